//! # greenhouse-app
//!
//! Application layer: the ingestion use-case and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SerialConnector` / `SerialLink`: open the device, poll it for lines
//!   - `LogSink`: append accepted readings to a durable log
//! - Own the **shared latest-state cell**: one writer (the reader loop), any
//!   number of cheap read-only handles (the HTTP facade)
//! - Run the **reconnecting reader loop**: open, poll, parse, derive, record,
//!   log, and back off on connection faults until shutdown
//!
//! ## Dependency rule
//! Depends on `greenhouse-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod reader_loop;
pub mod state_cell;
