//! Business logic services for the application layer.

pub mod code_allocator;
pub mod link_service;
pub mod resolver;

pub use code_allocator::CodeAllocator;
pub use link_service::LinkService;
pub use resolver::{Resolution, Resolver};
