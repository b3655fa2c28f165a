//! # greenhoused: greenhouse bridge daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the serial connector, the CSV log sink and the state cell
//! - Spawn the reader loop as the only writer of the state cell
//! - Build the axum router around a read handle on the state cell
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT) of both the server and the
//!   reader loop
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use greenhouse_adapter_csv_log::CsvLogSink;
use greenhouse_adapter_http_axum::state::AppState;
use greenhouse_adapter_serial::SerialPortConnector;
use greenhouse_app::reader_loop::ReaderLoop;
use greenhouse_app::state_cell::SharedState;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // State
    let state = SharedState::new();
    let latest = state.reader();

    // Reader loop
    tracing::info!(
        port = %config.serial.port,
        baud = config.serial.baud,
        log = %config.log.path.display(),
        "starting serial reader"
    );
    let reader = ReaderLoop::new(
        SerialPortConnector::new(config.serial.clone()),
        CsvLogSink::new(config.log.path.clone()),
        state,
        config.reader_config(),
    );
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let reader_task = tokio::spawn(reader.run(async move {
        // Only `true` is ever sent; a dropped sender stops the loop too.
        let _ = stop_rx.changed().await;
    }));

    // HTTP
    let app = greenhouse_adapter_http_axum::router::build(AppState::new(latest));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "greenhoused listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = stop_tx.send(true);
    if let Err(err) = reader_task.await {
        tracing::error!(error = %err, "reader loop task failed");
    }
    tracing::info!("greenhoused stopped");

    Ok(())
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
