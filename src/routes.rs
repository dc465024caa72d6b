//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_name}` - Short link redirect (`/{prefix}/{short_name}` with `REDIRECT_PREFIX`)
//! - `GET  /ping`         - Liveness probe
//! - `GET  /health`       - Health check
//! - `/api/*`             - Link registry REST API
//! - anything else        - JSON 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler, ping_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Static routes take precedence over the redirect route, so `/ping` and
/// `/health` are never treated as short names.
pub fn router(state: AppState) -> Router {
    let redirect_route = state.public_urls.redirect_route();

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route(&redirect_route, get(redirect_handler))
        .nest("/api", api::routes::link_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(tracing::layer())
}

/// [`router`] wrapped so that `/api/links/` and `/api/links` are the same route.
///
/// Path normalization has to run before routing, so it wraps the router
/// instead of being added with [`Router::layer`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
