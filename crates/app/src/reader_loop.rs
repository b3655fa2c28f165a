//! Reconnecting serial reader loop.
//!
//! Runs until the shutdown future resolves:
//!
//! 1. open the device; on failure mark `Disconnected`, wait the backoff, retry
//! 2. once open, mark `Connected` and poll at a fixed cadence, draining every
//!    complete line available at each poll
//! 3. each line is decoded, parsed and, if accepted, folded into the shared
//!    state (which goes `Online`) and appended to the log sink
//! 4. a link fault marks `Disconnected` and goes back to step 1 after the
//!    backoff
//!
//! Malformed lines and log-sink failures are logged and skipped. Shutdown is
//! observed at every open, poll and sleep.

use std::future::Future;
use std::ops::ControlFlow;
use std::time::Duration;

use greenhouse_domain::actuator;
use greenhouse_domain::error::RejectReason;
use greenhouse_domain::reading::{self, decode_line};
use greenhouse_domain::time::now;

use crate::ports::{LogSink, SerialConnector, SerialLink};
use crate::state_cell::SharedState;

/// Timing of the reader loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Delay between two polls of an open link.
    pub poll_interval: Duration,
    /// Delay before reopening after a failed open or a dropped link.
    pub backoff: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            backoff: Duration::from_secs(2),
        }
    }
}

/// Long-lived ingestion task: owns the serial connector, the log sink and
/// the write side of the latest-state cell.
pub struct ReaderLoop<C, S> {
    connector: C,
    sink: S,
    state: SharedState,
    config: ReaderConfig,
}

impl<C, S> ReaderLoop<C, S>
where
    C: SerialConnector,
    S: LogSink,
{
    #[must_use]
    pub fn new(connector: C, sink: S, state: SharedState, config: ReaderConfig) -> Self {
        Self {
            connector,
            sink,
            state,
            config,
        }
    }

    /// Run until `shutdown` resolves. Never stops on its own.
    pub async fn run<F>(mut self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        tokio::pin!(shutdown);

        loop {
            let opened = tokio::select! {
                biased;
                () = &mut shutdown => break,
                opened = self.connector.open() => opened,
            };

            match opened {
                Ok(mut link) => {
                    tracing::info!("serial device connected");
                    self.state.mark_connected();
                    if self.read_cycle(&mut link, &mut shutdown).await.is_break() {
                        break;
                    }
                    self.state.mark_disconnected();
                }
                Err(err) => {
                    tracing::warn!(error = %err, "serial device unavailable, retrying");
                    self.state.mark_disconnected();
                }
            }

            tokio::select! {
                biased;
                () = &mut shutdown => break,
                () = tokio::time::sleep(self.config.backoff) => {}
            }
        }

        tracing::info!("reader loop stopped");
    }

    /// Poll an open link until it faults (`Continue`) or shutdown (`Break`).
    async fn read_cycle<Sh>(&mut self, link: &mut C::Link, shutdown: &mut Sh) -> ControlFlow<()>
    where
        Sh: Future<Output = ()> + Unpin,
    {
        loop {
            loop {
                let polled = tokio::select! {
                    biased;
                    () = &mut *shutdown => return ControlFlow::Break(()),
                    polled = link.poll_line() => polled,
                };

                match polled {
                    Ok(Some(raw)) => self.ingest(&raw).await,
                    Ok(None) => break,
                    Err(err) => {
                        tracing::warn!(error = %err, "serial link dropped");
                        return ControlFlow::Continue(());
                    }
                }
            }

            tokio::select! {
                biased;
                () = &mut *shutdown => return ControlFlow::Break(()),
                () = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    async fn ingest(&mut self, raw: &[u8]) {
        let line = decode_line(raw);
        tracing::debug!(%line, "serial line received");
        if line.is_empty() {
            tracing::trace!("skipping empty line");
            return;
        }

        let reading = match reading::parse(&line) {
            Ok(reading) => reading,
            Err(RejectReason::Malformed(detail)) => {
                tracing::warn!(%line, reason = %detail, "discarding malformed serial line");
                return;
            }
        };

        let actuators = actuator::derive(reading);
        let record = self.state.record(reading, actuators, now());
        tracing::info!(
            temperature = reading.temperature,
            humidity = reading.humidity,
            fan_on = actuators.fan_on,
            pump_on = actuators.pump_on,
            "reading accepted"
        );

        if let Err(err) = self.sink.append(&record).await {
            tracing::error!(error = %err, "failed to append reading to log");
        }
    }
}
