//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    touch_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes.
///
/// # Endpoints
///
/// - `GET    /links`          - List links, newest first
/// - `POST   /links`          - Create a link (custom or generated code)
/// - `GET    /links/{code}`   - Fetch one link
/// - `PUT    /links/{code}`   - Record a click without redirecting
/// - `DELETE /links/{code}`   - Delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{code}",
            get(get_link_handler)
                .put(touch_link_handler)
                .delete(delete_link_handler),
        )
}
