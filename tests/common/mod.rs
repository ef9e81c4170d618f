#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::errors::StoreError;
use tinylink::domain::repositories::LinkRepository;
use tinylink::infrastructure::persistence::InMemoryLinkRepository;
use tinylink::routes::router;
use tinylink::state::AppState;
use tinylink::utils::code_generator::RandomCodeGenerator;

pub fn create_test_state(repository: Arc<dyn LinkRepository>) -> AppState {
    AppState::new(
        repository,
        Arc::new(RandomCodeGenerator::with_seed(8, 42)),
        10,
    )
}

/// Test server over a fresh in-memory store; the store handle is returned for
/// direct inspection.
pub fn create_test_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let server = server_for(repo.clone());
    (server, repo)
}

pub fn server_for(repository: Arc<dyn LinkRepository>) -> TestServer {
    let app: Router = router(create_test_state(repository));
    TestServer::new(app).unwrap()
}

pub async fn create_test_link(repo: &InMemoryLinkRepository, code: &str, url: &str) -> Link {
    repo.insert(NewLink::new(code, url)).await.unwrap()
}

/// Wraps the in-memory store and fails every click update (and ping) while
/// `broken` is set, and every lookup while `lookups_broken` is set. Inserts
/// always work.
#[derive(Default)]
pub struct FlakyRepository {
    pub inner: InMemoryLinkRepository,
    pub broken: AtomicBool,
    pub lookups_broken: AtomicBool,
}

impl FlakyRepository {
    pub fn break_updates(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn break_lookups(&self) {
        self.lookups_broken.store(true, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.broken.store(false, Ordering::SeqCst);
        self.lookups_broken.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl LinkRepository for FlakyRepository {
    async fn find(&self, code: &str) -> Result<Option<Link>, StoreError> {
        if self.lookups_broken.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("pool timed out".to_string()));
        }
        self.inner.find(code).await
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        self.inner.insert(new_link).await
    }

    async fn increment_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.inner.increment_and_touch(code, now).await
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        self.inner.delete(code).await
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        self.inner.list_all().await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection reset".to_string()));
        }
        self.inner.ping().await
    }
}
