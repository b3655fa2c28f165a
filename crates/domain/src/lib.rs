//! # greenhouse-domain
//!
//! Pure domain model for the greenhouse serial bridge.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Readings** (one validated temperature/humidity pair) and the
//!   line parser that produces them from raw serial lines
//! - Define the **actuator policy** (fan/pump flags derived from a reading)
//! - Define **`LatestState`** (most recent reading plus link status) and its
//!   transition rules
//! - Define **`LogRecord`** (one row of the append-only reading log)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod actuator;
pub mod log_record;
pub mod reading;
pub mod state;
