//! Application layer services implementing business logic.
//!
//! Services consume the [`crate::domain::repositories::LinkRepository`] trait
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, listing and deletion
//! - [`services::code_allocator::CodeAllocator`] - Custom and generated code assignment
//! - [`services::resolver::Resolver`] - Redirect resolution with click accounting

pub mod services;
