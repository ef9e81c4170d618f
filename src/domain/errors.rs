//! Error taxonomy for store access and link operations.
//!
//! [`StoreError`] is what a [`crate::domain::repositories::LinkRepository`]
//! reports. [`LinkError`] is what the application services report to the HTTP
//! layer, which maps it onto status codes in [`crate::error::AppError`].

use thiserror::Error;

/// Failures reported by a link store.
///
/// "Not found" is not an error at this level: lookups return `Option` and
/// deletes return `bool`, the same way the store answers them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// An insert collided with an existing code.
    #[error("code '{code}' already exists")]
    Conflict { code: String },

    /// The store could not be reached within its timeout. Transient.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Any other store-side fault.
    #[error("store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

/// Failures reported by link creation, lookup and resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("invalid code: {0}")]
    InvalidCode(String),

    #[error("code '{0}' is already taken")]
    CodeTaken(String),

    #[error("no link with code '{0}'")]
    NotFound(String),

    #[error("no free code found after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for LinkError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { code } => LinkError::CodeTaken(code),
            StoreError::Unavailable(reason) => LinkError::StoreUnavailable(reason),
            StoreError::Internal(reason) => LinkError::Internal(reason),
        }
    }
}
