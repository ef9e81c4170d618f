//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::LinkRepository;
use crate::utils::db_error::classify_sqlx_error;

/// Default bound on a single store operation.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Row shape shared by every query below.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    target_url: String,
    click_count: i64,
    last_clicked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.code,
            r.target_url,
            r.click_count,
            r.last_clicked_at,
            r.created_at,
        )
    }
}

/// PostgreSQL repository for link storage.
///
/// Uniqueness comes from the `links_code_key` constraint and the click update
/// is a single `UPDATE ... RETURNING`, so Postgres' row lock serializes
/// concurrent clicks on the same code. Every statement is bounded by a timeout
/// on top of the pool's own acquire timeout.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    timeout: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    /// Creates a repository whose operations give up after `timeout`.
    pub fn with_timeout(pool: Arc<PgPool>, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    async fn bounded<T, F>(&self, code: &str, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result.map_err(|e| classify_sqlx_error(e, code)),
            Err(_) => Err(StoreError::Unavailable(format!(
                "operation timed out after {} ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let row = self
            .bounded(
                code,
                sqlx::query_as::<_, LinkRow>(
                    r#"
            SELECT id, code, target_url, click_count, last_clicked_at, created_at
            FROM links
            WHERE code = $1
            "#,
                )
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError> {
        let row = self
            .bounded(
                &new_link.code,
                sqlx::query_as::<_, LinkRow>(
                    r#"
            INSERT INTO links (code, target_url)
            VALUES ($1, $2)
            RETURNING id, code, target_url, click_count, last_clicked_at, created_at
            "#,
                )
                .bind(&new_link.code)
                .bind(&new_link.target_url)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn increment_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, StoreError> {
        // GREATEST skips NULLs, so the first click takes max(now, created_at).
        let row = self
            .bounded(
                code,
                sqlx::query_as::<_, LinkRow>(
                    r#"
            UPDATE links
            SET click_count = click_count + 1,
                last_clicked_at = GREATEST(last_clicked_at, $2, created_at)
            WHERE code = $1
            RETURNING id, code, target_url, click_count, last_clicked_at, created_at
            "#,
                )
                .bind(code)
                .bind(now)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        let result = self
            .bounded(
                code,
                sqlx::query("DELETE FROM links WHERE code = $1")
                    .bind(code)
                    .execute(self.pool.as_ref()),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<Link>, StoreError> {
        let rows = self
            .bounded(
                "",
                sqlx::query_as::<_, LinkRow>(
                    r#"
            SELECT id, code, target_url, click_count, last_clicked_at, created_at
            FROM links
            ORDER BY created_at DESC, id DESC
            "#,
                )
                .fetch_all(self.pool.as_ref()),
            )
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(
            "",
            sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(self.pool.as_ref()),
        )
        .await?;

        Ok(())
    }
}
