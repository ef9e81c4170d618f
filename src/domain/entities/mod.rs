//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a target URL, with click accounting
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! [`NewLink`] carries only the fields a caller chooses, while the store fills
//! in the identifier, counters and timestamps.

pub mod link;

pub use link::{Link, NewLink};
