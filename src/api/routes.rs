//! Router configuration for the API.
//!
//! Centralized route registration and middleware configuration.

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::middleware::{logging_middleware, request_id_middleware, session_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order (last added runs first):
/// request id → logging → session resolution → handler.
///
/// # Routes
/// - `/health` - Liveness probe
/// - `/api/repo/...` - Repo lifecycle and entry batch operations
/// - `/api/scrape` - Metadata scrape helper
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest(
            "/repo",
            handlers::repos::repo_routes().merge(handlers::entries::entry_routes()),
        )
        .merge(handlers::scrape::scrape_routes());

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/api", api_routes)
        // Middleware is applied in reverse order - last added runs first
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
