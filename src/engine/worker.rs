//! Worker dispatch: one concurrent fetch task per target.

use crate::fetch::Fetcher;
use crate::types::{Outcome, Target};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Spawn one worker task per target.
///
/// Each worker performs the remote call, converts any error into a
/// failure outcome carrying the error's description, and emits exactly
/// one outcome into the collector before terminating. Faults never escape
/// a worker. The original sender is dropped when dispatch returns, so the
/// channel closes once every worker has reported.
pub(crate) fn dispatch(
    targets: Vec<Target>,
    fetcher: Arc<dyn Fetcher>,
    outcome_tx: mpsc::Sender<Outcome>,
    cancel: CancellationToken,
) {
    for target in targets {
        let fetcher = Arc::clone(&fetcher);
        let outcome_tx = outcome_tx.clone();
        let cancel = cancel.clone();

        tokio::spawn(async move {
            tracing::debug!(%target, "worker dispatched");

            let call_result = tokio::select! {
                result = fetcher.fetch(&target) => match result {
                    Ok(payload) => Ok(payload),
                    Err(e) => Err(e.to_string()),
                },
                _ = cancel.cancelled() => Err("cancelled at batch deadline".to_string()),
            };

            let outcome = match call_result {
                Ok(payload) => Outcome::Success { target, payload },
                Err(reason) => Outcome::Failure { target, reason },
            };

            // Channel capacity equals the batch size, so the send never
            // blocks on a slow coordinator. After the terminal transition
            // the receiver is gone and the outcome is dropped here.
            if outcome_tx.send(outcome).await.is_err() {
                tracing::debug!("outcome arrived after batch completion, discarded");
            }
        });
    }
}
