//! Fan-out engine split into focused submodules.
//!
//! - [`worker`] - Concurrent dispatch, one task per target
//! - [`coordinator`] - Collection state machine and deadline handling
//! - [`aggregator`] - Report rendering

mod aggregator;
mod coordinator;
mod worker;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::types::{BatchReport, Event, Target};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

/// Deadline-bounded concurrent fan-out engine
///
/// One engine instance can serve many batch invocations; each invocation
/// allocates its own collector, result set, and cancellation scope, so no
/// mutable state is shared across batches.
#[derive(Clone)]
pub struct FanoutEngine {
    /// Configuration (wrapped in Arc for sharing across tasks)
    config: Arc<Config>,
    /// Remote-call collaborator (trait object for pluggable implementations)
    fetcher: Arc<dyn Fetcher>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
}

impl FanoutEngine {
    /// Create an engine with the built-in HTTP collaborator
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        Self::with_fetcher(config, Arc::new(fetcher))
    }

    /// Create an engine around a custom remote-call collaborator
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        config.validate()?;

        let (event_tx, _rx) = broadcast::channel(config.batch.event_buffer);

        tracing::info!(
            fetcher = fetcher.name(),
            timeout = ?config.batch.timeout,
            "fan-out engine initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            fetcher,
            event_tx,
        })
    }

    /// Subscribe to batch lifecycle events
    ///
    /// Multiple subscribers are supported; each receives all events
    /// independently. A subscriber that falls behind by more than the
    /// configured `event_buffer` receives a `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the current configuration
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Emit an event to all subscribers
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub(crate) fn emit_event(&self, event: Event) {
        self.event_tx.send(event).ok();
    }

    /// Dispatch one batch of targets and wait for the rendered report.
    ///
    /// Spawns one worker per target, collects outcomes through a bounded
    /// channel, and terminates on whichever comes first: every outcome
    /// arrived, or the configured deadline elapsed. The deadline clock
    /// starts when dispatch begins and is never extended. Callers always
    /// receive a report; per-target failures and batch truncation are
    /// recorded in it, never raised as errors.
    pub async fn run_batch(&self, targets: Vec<Target>) -> BatchReport {
        let total = targets.len();
        tracing::info!(targets = total, timeout = ?self.config.batch.timeout, "starting batch");
        self.emit_event(Event::BatchStarted { total });

        let (outcome_tx, outcome_rx) = mpsc::channel(total.max(1));
        let cancel = CancellationToken::new();

        let deadline = tokio::time::Instant::now() + self.config.batch.timeout;
        worker::dispatch(targets, Arc::clone(&self.fetcher), outcome_tx, cancel.clone());

        let results =
            coordinator::collect(outcome_rx, total, deadline, &cancel, &self.event_tx).await;

        self.emit_event(Event::BatchFinished {
            received: results.len(),
            truncated: results.timed_out(),
        });
        tracing::info!(
            received = results.len(),
            truncated = results.timed_out(),
            "batch finished"
        );

        aggregator::render(results)
    }
}
