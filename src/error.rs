//! HTTP-facing error type.
//!
//! Every error response has the body `{"error": "<message>"}`. Internal
//! failures are logged with their details and answered with a generic
//! message.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::errors::LinkError;

pub const INVALID_URL_MESSAGE: &str =
    "Invalid URL. Please provide a valid http:// or https:// URL.";
pub const INVALID_CODE_MESSAGE: &str =
    "Invalid code. Only alphanumeric characters, hyphens, and underscores are allowed.";
pub const CODE_TAKEN_MESSAGE: &str = "Code already exists. Please choose a different code.";
pub const NOT_FOUND_MESSAGE: &str = "Link not found";
pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    /// `details` is logged, never sent to the client.
    #[error("internal error: {details}")]
    Internal { details: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal {
            details: details.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message sent to the client.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message } => message.clone(),
            AppError::Internal { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }
}

impl From<LinkError> for AppError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::InvalidUrl(_) => AppError::bad_request(INVALID_URL_MESSAGE),
            LinkError::InvalidCode(_) => AppError::bad_request(INVALID_CODE_MESSAGE),
            LinkError::CodeTaken(_) => AppError::conflict(CODE_TAKEN_MESSAGE),
            LinkError::NotFound(_) => AppError::not_found(NOT_FOUND_MESSAGE),
            LinkError::AllocationExhausted { .. }
            | LinkError::StoreUnavailable(_)
            | LinkError::Internal(_) => AppError::internal(e.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| INVALID_REQUEST_MESSAGE.to_string());

        AppError::bad_request(message)
    }
}

/// Body extraction failures for `POST /links`.
///
/// Well-formed JSON whose fields have the wrong type (e.g. `{"url": 123}`)
/// carries no usable URL and is answered like an invalid URL. Anything that
/// is not JSON at all gets the generic message.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");

        match rejection {
            JsonRejection::JsonDataError(_) => AppError::bad_request(INVALID_URL_MESSAGE),
            _ => AppError::bad_request(INVALID_REQUEST_MESSAGE),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { details } = &self {
            tracing::error!(error = %details, "Request failed");
        }

        let status = self.status_code();
        let body = ErrorBody {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}
