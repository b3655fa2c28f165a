//! Shared latest-state cell.
//!
//! [`SharedState`] is the single writer and is deliberately not `Clone`: the
//! reader loop owns it. Observers get [`StateReader`] handles, which only
//! take snapshots. The lock is held for one field-group copy and never
//! across an `.await`.

use std::sync::{Arc, PoisonError, RwLock};

use greenhouse_domain::actuator::ActuatorState;
use greenhouse_domain::log_record::LogRecord;
use greenhouse_domain::reading::Reading;
use greenhouse_domain::state::LatestState;
use greenhouse_domain::time::Timestamp;

/// Write side of the latest-state cell.
#[derive(Debug, Default)]
pub struct SharedState {
    inner: Arc<RwLock<LatestState>>,
}

impl SharedState {
    /// Create a cell holding the initial (disconnected, empty) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a read-only handle.
    #[must_use]
    pub fn reader(&self) -> StateReader {
        StateReader {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> LatestState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fold an accepted reading in, as one atomic group update.
    pub fn record(
        &mut self,
        reading: Reading,
        actuators: ActuatorState,
        at: Timestamp,
    ) -> LogRecord {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .record(reading, actuators, at)
    }

    pub fn mark_connected(&mut self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .mark_connected();
    }

    pub fn mark_disconnected(&mut self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .mark_disconnected();
    }
}

/// Read side of the latest-state cell. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StateReader {
    inner: Arc<RwLock<LatestState>>,
}

impl StateReader {
    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> LatestState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
