//! Embedded dashboard page.
//!
//! A single static HTML document polling `/api/data` every couple of
//! seconds. It ships inside the binary so the daemon has no asset
//! directory to locate at runtime.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

/// Build the dashboard sub-router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
