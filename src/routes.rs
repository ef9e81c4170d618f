//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`   - Short link redirect
//! - `GET  /health`   - Health check
//! - `/links...`      - Link management (see [`crate::api::routes::link_routes`])
//!
//! Static segments win over `/{code}`, which is why `links` and `health` are
//! reserved codes.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::link_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] behind trailing-slash
/// normalization, so `/links/` and `/abc/` behave like `/links` and `/abc`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
