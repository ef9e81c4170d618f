//! Link creation, retrieval and management service.

use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use tracing::{error, info, instrument};

use crate::application::services::code_allocator::CodeAllocator;
use crate::domain::entities::Link;
use crate::domain::errors::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::url_normalizer::normalize_url;

/// Service for creating and managing short links.
///
/// Validates the target URL, delegates code assignment to the
/// [`CodeAllocator`] and exposes the remaining store operations to the HTTP
/// layer with not-found folded into [`LinkError::NotFound`].
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    allocator: CodeAllocator,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, allocator: CodeAllocator) -> Self {
        Self {
            repository,
            allocator,
        }
    }

    /// Creates a short link.
    ///
    /// # Arguments
    ///
    /// - `target_url` - The URL to redirect to (must be `http`/`https`)
    /// - `custom_code` - Optional caller-chosen code; an empty string counts
    ///   as absent and a generated code is used instead. Anything else,
    ///   whitespace included, must pass code validation.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidUrl`] or [`LinkError::InvalidCode`] on bad
    /// input, [`LinkError::CodeTaken`] if the custom code exists and
    /// [`LinkError::AllocationExhausted`] if no generated code was free.
    #[instrument(skip(self))]
    pub async fn create_link(
        &self,
        target_url: &str,
        custom_code: Option<String>,
    ) -> Result<Link, LinkError> {
        let target_url =
            normalize_url(target_url).map_err(|e| LinkError::InvalidUrl(e.to_string()))?;

        let custom_code = custom_code.filter(|code| !code.is_empty());

        let link = self
            .allocator
            .allocate(target_url, custom_code)
            .await
            .inspect_err(|e| log_store_failure("create_link", None, e))?;

        counter!("tinylink_links_created_total").increment(1);
        info!(code = %link.code, target_url = %link.target_url, "Link created");

        Ok(link)
    }

    /// Retrieves a link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link matches the code.
    #[instrument(skip(self))]
    pub async fn get_link(&self, code: &str) -> Result<Link, LinkError> {
        self.repository
            .find(code)
            .await
            .map_err(LinkError::from)
            .inspect_err(|e| log_store_failure("get_link", Some(code), e))?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))
    }

    /// Lists every link, newest first.
    #[instrument(skip(self))]
    pub async fn list_links(&self) -> Result<Vec<Link>, LinkError> {
        self.repository
            .list_all()
            .await
            .map_err(LinkError::from)
            .inspect_err(|e| log_store_failure("list_links", None, e))
    }

    /// Deletes a link outright.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link matches the code.
    #[instrument(skip(self))]
    pub async fn delete_link(&self, code: &str) -> Result<(), LinkError> {
        let deleted = self
            .repository
            .delete(code)
            .await
            .map_err(LinkError::from)
            .inspect_err(|e| log_store_failure("delete_link", Some(code), e))?;

        if !deleted {
            return Err(LinkError::NotFound(code.to_string()));
        }

        info!(code, "Link deleted");
        Ok(())
    }

    /// Records a click without redirecting and returns the updated link.
    ///
    /// Unlike the redirect path, a failed update is an error here: the
    /// caller asked for the write itself.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] if no link matches the code.
    #[instrument(skip(self))]
    pub async fn touch_link(&self, code: &str) -> Result<Link, LinkError> {
        self.repository
            .increment_and_touch(code, Utc::now())
            .await
            .map_err(LinkError::from)
            .inspect_err(|e| log_store_failure("touch_link", Some(code), e))?
            .ok_or_else(|| LinkError::NotFound(code.to_string()))
    }

    /// Checks that the underlying store answers.
    pub async fn check_store(&self) -> Result<(), LinkError> {
        self.repository.ping().await.map_err(LinkError::from)
    }
}

fn log_store_failure(operation: &str, code: Option<&str>, e: &LinkError) {
    if matches!(
        e,
        LinkError::StoreUnavailable(_)
            | LinkError::Internal(_)
            | LinkError::AllocationExhausted { .. }
    ) {
        error!(operation, code, error = %e, "Link store operation failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::code_allocator::DEFAULT_MAX_ATTEMPTS;
    use crate::domain::errors::StoreError;
    use crate::domain::repositories::MockLinkRepository;
    use crate::infrastructure::persistence::InMemoryLinkRepository;
    use crate::utils::code_generator::RandomCodeGenerator;

    fn service_with(repo: Arc<dyn LinkRepository>) -> LinkService {
        let allocator = CodeAllocator::new(
            repo.clone(),
            Arc::new(RandomCodeGenerator::with_seed(8, 1)),
            DEFAULT_MAX_ATTEMPTS,
        );
        LinkService::new(repo, allocator)
    }

    fn in_memory_service() -> (LinkService, Arc<InMemoryLinkRepository>) {
        let repo = Arc::new(InMemoryLinkRepository::new());
        (service_with(repo.clone()), repo)
    }

    #[tokio::test]
    async fn test_create_link_with_generated_code() {
        let (service, _repo) = in_memory_service();

        let link = service
            .create_link("https://example.com/page", None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 8);
        assert_eq!(link.target_url, "https://example.com/page");
        assert_eq!(link.click_count, 0);
        assert!(link.last_clicked_at.is_none());
    }

    #[tokio::test]
    async fn test_create_link_normalizes_url() {
        let (service, _repo) = in_memory_service();

        let link = service
            .create_link("HTTPS://EXAMPLE.COM", Some("norm".to_string()))
            .await
            .unwrap();

        assert_eq!(link.target_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_create_link_invalid_url_inserts_nothing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        let service = service_with(Arc::new(repo));

        let result = service.create_link("not-a-url", None).await;

        assert!(matches!(result, Err(LinkError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_create_link_empty_custom_code_generates() {
        let (service, _repo) = in_memory_service();

        let link = service
            .create_link("https://example.com/", Some(String::new()))
            .await
            .unwrap();

        assert_eq!(link.code.len(), 8);
    }

    #[tokio::test]
    async fn test_create_link_whitespace_custom_code_rejected() {
        let (service, repo) = in_memory_service();

        let result = service
            .create_link("https://example.com/", Some("   ".to_string()))
            .await;

        assert!(matches!(result, Err(LinkError::InvalidCode(_))));
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_create_link_duplicate_custom_code() {
        let (service, repo) = in_memory_service();

        service
            .create_link("https://a.example/", Some("mine".to_string()))
            .await
            .unwrap();
        let second = service
            .create_link("https://b.example/", Some("mine".to_string()))
            .await;

        assert_eq!(second, Err(LinkError::CodeTaken("mine".to_string())));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let (service, _repo) = in_memory_service();

        let result = service.get_link("nope").await;

        assert_eq!(result, Err(LinkError::NotFound("nope".to_string())));
    }

    #[tokio::test]
    async fn test_delete_link() {
        let (service, repo) = in_memory_service();
        service
            .create_link("https://example.com/", Some("bye".to_string()))
            .await
            .unwrap();

        service.delete_link("bye").await.unwrap();

        assert!(repo.is_empty());
        assert!(matches!(
            service.delete_link("bye").await,
            Err(LinkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_touch_link_increments() {
        let (service, _repo) = in_memory_service();
        service
            .create_link("https://example.com/", Some("tap".to_string()))
            .await
            .unwrap();

        service.touch_link("tap").await.unwrap();
        let link = service.touch_link("tap").await.unwrap();

        assert_eq!(link.click_count, 2);
        assert!(link.last_clicked_at.is_some());
    }

    #[tokio::test]
    async fn test_touch_link_store_failure_is_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_increment_and_touch()
            .times(1)
            .returning(|_, _| Err(StoreError::Unavailable("down".to_string())));
        let service = service_with(Arc::new(repo));

        let result = service.touch_link("abc").await;

        assert!(matches!(result, Err(LinkError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_list_links_newest_first() {
        let (service, _repo) = in_memory_service();
        for code in ["one", "two", "three"] {
            service
                .create_link("https://example.com/", Some(code.to_string()))
                .await
                .unwrap();
        }

        let codes: Vec<String> = service
            .list_links()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();

        assert_eq!(codes, vec!["three", "two", "one"]);
    }
}
