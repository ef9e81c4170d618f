//! Repository trait definitions for the domain layer.
//!
//! The [`LinkRepository`] trait abstracts the link store. Implementations live
//! in `crate::infrastructure::persistence`; a mock implementation is generated
//! via `mockall` for unit tests.
//!
//! # Testing
//!
//! See `tests/repository_link.rs` for the PostgreSQL contract tests and the
//! in-memory repository's unit tests for concurrency checks.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
