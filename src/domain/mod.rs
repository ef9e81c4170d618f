//! Domain layer containing business entities and storage contracts.
//!
//! This module defines the link entity, the repository interface that the
//! infrastructure layer implements, and the error taxonomy shared by the
//! store and the services built on top of it.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`errors`] - Store and link-operation error types
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Click Accounting Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::Resolver`] looks up the link
//! 3. The click is applied through [`repositories::LinkRepository::increment_and_touch`],
//!    a single atomic store operation
//! 4. The handler redirects to the stored target URL

pub mod entities;
pub mod errors;
pub mod repositories;
