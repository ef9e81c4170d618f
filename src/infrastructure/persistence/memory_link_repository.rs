//! In-memory implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;

/// In-process link store backed by a [`DashMap`].
///
/// Provides the same guarantees as the PostgreSQL store: inserts go through
/// the map's entry API, so two concurrent inserts of one code cannot both
/// win, and a click is applied while holding the shard's write lock, so no
/// increment is lost. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find(&self, code: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get(code).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        match self.links.entry(new_link.code) {
            Entry::Occupied(occupied) => Err(StoreError::Conflict {
                code: occupied.key().clone(),
            }),
            Entry::Vacant(vacant) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                let link = Link::new(
                    id,
                    vacant.key().clone(),
                    new_link.target_url,
                    0,
                    None,
                    Utc::now(),
                );
                vacant.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn increment_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, StoreError> {
        Ok(self.links.get_mut(code).map(|mut entry| {
            entry.record_click(now);
            entry.value().clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        Ok(self.links.remove(code).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let mut links: Vec<Link> = self
            .links
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
