//! Handlers for link management endpoints (create, list, get, delete, touch).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse, MessageResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "code": "my-link"   // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or code, and for a body that
/// is not a JSON object of the shape above.
/// Returns 409 Conflict if the custom code already exists.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(&payload.url, payload.code)
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Deletes a link outright.
///
/// # Endpoint
///
/// `DELETE /links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(MessageResponse {
        message: "Link deleted successfully".to_string(),
    }))
}

/// Records a click without redirecting and returns the updated link.
///
/// # Endpoint
///
/// `PUT /links/{code}`
///
/// The request body, if any, is ignored: neither the code nor the target URL
/// can be changed.
///
/// # Errors
///
/// Returns 404 Not Found if the code doesn't exist.
pub async fn touch_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.touch_link(&code).await?;

    Ok(Json(link.into()))
}
