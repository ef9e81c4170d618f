//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{CodeAllocator, LinkService, Resolver};
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::CodeGenerator;

/// Handles to the services, built once at startup around a single store.
///
/// Cloning is cheap: every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub resolver: Arc<Resolver>,
}

impl AppState {
    /// Wires the services around one shared repository.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        max_attempts: usize,
    ) -> Self {
        let allocator = CodeAllocator::new(repository.clone(), generator, max_attempts);

        Self {
            link_service: Arc::new(LinkService::new(repository.clone(), allocator)),
            resolver: Arc::new(Resolver::new(repository)),
        }
    }
}
