//! Utility functions for code generation, URL processing and error mapping.
//!
//! - [`code_generator`] - Random code generation and custom code validation
//! - [`url_normalizer`] - Target URL validation and canonicalization
//! - [`db_error`] - `sqlx` error classification

pub mod code_generator;
pub mod db_error;
pub mod url_normalizer;
