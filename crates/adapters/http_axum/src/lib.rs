//! # greenhouse-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the latest greenhouse state as JSON on `GET /api/data`
//! - Serve the embedded dashboard page on `GET /`, which polls the API
//! - Answer `GET /health` for liveness probes
//!
//! Every request reads a fresh snapshot from the shared state cell. The
//! API always answers `200`, including while the controller is
//! disconnected; the `status` field carries that information.
//!
//! ## Dependency rule
//! Depends on `greenhouse-app` (for the state reader) and `greenhouse-domain`
//! (for the serialized state). Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod router;
pub mod state;
