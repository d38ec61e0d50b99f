//! HTTP layer for the Pulse fitness API.
//!
//! Handlers translate one request into one storage call (two for the plan
//! detail, read as one snapshot) and map the result onto a status code.

use axum::Router;
use axum::middleware::from_fn;
use std::path::Path;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{Config, Environment, Settings};
pub use state::AppState;

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// The full application: `/api` routes, optional SPA hosting for every
/// other path, and the cross-cutting layers.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let mut router = Router::new().nest("/api", routes::api_routes(&state));

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(spa);
    }

    with_layers(router, state)
}

/// Body limit, panic catcher, development CORS and the request log around
/// `router`.
pub fn with_layers(router: Router<AppState>, state: AppState) -> Router {
    let mut router = router
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(middleware::handle_panic));

    if state.settings.is_development() {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(from_fn(middleware::request_log)).with_state(state)
}
