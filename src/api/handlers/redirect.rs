//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code
/// 2. Atomically increment its click count and stamp `last_clicked_at`
/// 3. Return 302 Found with the stored target as `Location`
///
/// # Click Tracking
///
/// Click accounting is best-effort: if step 2 fails for infrastructure
/// reasons the failure is logged and the redirect is still issued.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
/// Returns 500 Internal Server Error if the lookup itself fails.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let resolution = state.resolver.resolve(&code).await?;

    if !resolution.click_recorded {
        debug!(code = %code, "Redirecting without a recorded click");
    }

    let location = HeaderValue::from_str(&resolution.target_url).map_err(|e| {
        AppError::internal(format!(
            "target URL for '{}' is not a valid Location header: {}",
            code, e
        ))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
