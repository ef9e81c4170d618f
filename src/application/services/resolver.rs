//! Redirect resolution with best-effort click accounting.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tracing::{instrument, warn};

use crate::domain::errors::LinkError;
use crate::domain::repositories::LinkRepository;

/// Outcome of resolving a code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Where to redirect the client.
    pub target_url: String,
    /// Whether the click was applied to the store.
    pub click_recorded: bool,
}

/// Turns a code into a redirect target and records the click.
///
/// The lookup gates the redirect; the click update does not. Once the target
/// URL is in hand, a failing increment is logged and counted, and the client
/// is still redirected.
pub struct Resolver {
    repository: Arc<dyn LinkRepository>,
}

impl Resolver {
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Resolves `code`.
    ///
    /// 1. Look the link up. Unknown codes fail with [`LinkError::NotFound`]
    ///    and nothing is written.
    /// 2. Apply the atomic increment-and-touch.
    /// 3. If that update fails for infrastructure reasons, redirect anyway
    ///    with `click_recorded = false`.
    ///
    /// A link deleted between steps 1 and 2 is reported as not found.
    ///
    /// # Errors
    ///
    /// - [`LinkError::NotFound`] for unknown codes
    /// - [`LinkError::StoreUnavailable`] / [`LinkError::Internal`] if the
    ///   lookup itself fails
    #[instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<Resolution, LinkError> {
        let link = self
            .repository
            .find(code)
            .await?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))?;

        match self.repository.increment_and_touch(code, Utc::now()).await {
            Ok(Some(updated)) => {
                counter!("tinylink_redirects_total").increment(1);
                Ok(Resolution {
                    target_url: updated.target_url,
                    click_recorded: true,
                })
            }
            Ok(None) => Err(LinkError::NotFound(code.to_string())),
            Err(e) => {
                counter!("tinylink_redirects_total").increment(1);
                counter!("tinylink_click_update_failures_total").increment(1);
                warn!(code, error = %e, "Click update failed, redirecting without recording");
                Ok(Resolution {
                    target_url: link.target_url,
                    click_recorded: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::errors::StoreError;
    use crate::domain::repositories::MockLinkRepository;

    fn sample_link(code: &str, clicks: i64) -> Link {
        Link::new(
            7,
            code.to_string(),
            "https://example.com/page".to_string(),
            clicks,
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_resolve_records_click() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find()
            .withf(|code| code == "abc")
            .times(1)
            .returning(|code| Ok(Some(sample_link(code, 0))));
        repo.expect_increment_and_touch()
            .withf(|code, _| code == "abc")
            .times(1)
            .returning(|code, now| {
                let mut link = sample_link(code, 0);
                link.record_click(now);
                Ok(Some(link))
            });

        let resolver = Resolver::new(Arc::new(repo));
        let resolution = resolver.resolve("abc").await.unwrap();

        assert_eq!(resolution.target_url, "https://example.com/page");
        assert!(resolution.click_recorded);
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_writes_nothing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find().times(1).returning(|_| Ok(None));
        repo.expect_increment_and_touch().times(0);

        let resolver = Resolver::new(Arc::new(repo));
        let result = resolver.resolve("does-not-exist").await;

        assert_eq!(
            result,
            Err(LinkError::NotFound("does-not-exist".to_string()))
        );
    }

    #[tokio::test]
    async fn test_resolve_redirects_when_click_update_fails() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find()
            .times(1)
            .returning(|code| Ok(Some(sample_link(code, 3))));
        repo.expect_increment_and_touch()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("timed out".to_string())));

        let resolver = Resolver::new(Arc::new(repo));
        let resolution = resolver.resolve("abc").await.unwrap();

        assert_eq!(resolution.target_url, "https://example.com/page");
        assert!(!resolution.click_recorded);
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure_propagates() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("pool timed out".to_string())));
        repo.expect_increment_and_touch().times(0);

        let resolver = Resolver::new(Arc::new(repo));
        let result = resolver.resolve("abc").await;

        assert!(matches!(result, Err(LinkError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_resolve_deleted_between_lookup_and_update() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find()
            .times(1)
            .returning(|code| Ok(Some(sample_link(code, 0))));
        repo.expect_increment_and_touch()
            .times(1)
            .returning(|_, _| Ok(None));

        let resolver = Resolver::new(Arc::new(repo));
        let result = resolver.resolve("abc").await;

        assert!(matches!(result, Err(LinkError::NotFound(_))));
    }
}
