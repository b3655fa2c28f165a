//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod data;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/data", get(data::get))
}
