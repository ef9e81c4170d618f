//! Collision-free code assignment for new links.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::errors::{LinkError, StoreError};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::{CodeGenerator, validate_code};

/// Default ceiling on generated-code insert attempts.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Assigns codes to new links and inserts them.
///
/// The store's duplicate-key rejection is the only uniqueness check: a
/// candidate is simply inserted, and a [`StoreError::Conflict`] either fails
/// the request (custom codes) or triggers a fresh draw (generated codes).
pub struct CodeAllocator {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    max_attempts: usize,
}

impl CodeAllocator {
    /// Creates an allocator. `max_attempts` is clamped to at least 1.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Inserts `target_url` under `custom_code` if given, otherwise under a
    /// generated code.
    pub async fn allocate(
        &self,
        target_url: String,
        custom_code: Option<String>,
    ) -> Result<Link, LinkError> {
        match custom_code {
            Some(code) => self.insert_custom(code, target_url).await,
            None => self.insert_generated(target_url).await,
        }
    }

    /// Inserts under a caller-chosen code.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidCode`] if the code fails validation
    /// - [`LinkError::CodeTaken`] if the store already holds the code; there
    ///   is no fallback to a generated code
    #[instrument(skip(self, target_url))]
    pub async fn insert_custom(&self, code: String, target_url: String) -> Result<Link, LinkError> {
        validate_code(&code)?;

        self.repository
            .insert(NewLink::new(code, target_url))
            .await
            .map_err(LinkError::from)
    }

    /// Inserts under a randomly drawn code, retrying on collision.
    ///
    /// Each attempt draws a candidate and inserts it. Candidates that fail
    /// validation (e.g. a reserved route word) are discarded and still count
    /// as an attempt.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::AllocationExhausted`] once `max_attempts` draws
    /// have all collided. Store failures other than a conflict abort the
    /// loop immediately.
    #[instrument(skip(self, target_url))]
    pub async fn insert_generated(&self, target_url: String) -> Result<Link, LinkError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            if let Err(e) = validate_code(&candidate) {
                debug!(attempt, candidate = %candidate, error = %e, "Discarding unusable candidate");
                continue;
            }

            match self
                .repository
                .insert(NewLink::new(candidate, target_url.clone()))
                .await
            {
                Ok(link) => return Ok(link),
                Err(StoreError::Conflict { code }) => {
                    counter!("tinylink_code_collisions_total").increment(1);
                    debug!(attempt, code = %code, "Code collision, drawing a new candidate");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "No free code found, code space may be saturated"
        );
        Err(LinkError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}
