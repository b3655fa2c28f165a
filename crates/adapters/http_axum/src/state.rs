//! Shared application state for axum handlers.

use greenhouse_app::state_cell::StateReader;

/// Application state shared across all axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read handle on the latest-state cell.
    pub latest: StateReader,
}

impl AppState {
    #[must_use]
    pub fn new(latest: StateReader) -> Self {
        Self { latest }
    }
}
