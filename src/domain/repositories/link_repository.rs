//! Repository trait for link storage.

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for the link store.
///
/// Every implementation must enforce code uniqueness itself (a duplicate
/// insert fails with [`StoreError::Conflict`]) and apply
/// [`LinkRepository::increment_and_touch`] as one indivisible operation.
/// Any call may fail with [`StoreError::Unavailable`] when the backing store
/// does not answer within its timeout.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its exact (case-sensitive) code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    async fn find(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// Inserts a new link and returns the canonical stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Conflict`] if the code already exists. The check
    /// is the store's own constraint, never a prior read.
    async fn insert(&self, new_link: NewLink) -> Result<Link, StoreError>;

    /// Atomically applies `click_count += 1` and `last_clicked_at = now`.
    ///
    /// Returns the post-update record, or `Ok(None)` if no link has this code.
    async fn increment_and_touch(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Link>, StoreError>;

    /// Removes a link outright.
    ///
    /// Returns `Ok(true)` if a link was deleted, `Ok(false)` if none matched.
    async fn delete(&self, code: &str) -> Result<bool, StoreError>;

    /// Lists every link, newest first (`created_at` descending, then `id`
    /// descending).
    async fn list_all(&self) -> Result<Vec<Link>, StoreError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
