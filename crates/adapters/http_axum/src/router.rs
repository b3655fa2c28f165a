//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Merges API routes under `/api` and the dashboard at `/`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level, and a permissive [`CorsLayer`] so other origins can poll
/// the API.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
