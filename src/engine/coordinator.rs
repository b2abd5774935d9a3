//! Coordinator state machine driving the collection loop for one batch.

use crate::types::{BatchState, Event, Outcome, ResultSet};
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Collect outcomes until every dispatched target has reported or the
/// deadline elapses, whichever happens first.
///
/// The state machine takes a single forward transition from `Collecting`
/// to `Done`. Each tick races "next outcome available" against "deadline
/// elapsed". On the deadline, outcomes received so far are kept, the set
/// is marked truncated, and outstanding workers are cancelled; dropping
/// the receiver on return means a late outcome fails to send and is
/// discarded, so nothing can mutate the set after `Done`.
pub(crate) async fn collect(
    mut outcome_rx: mpsc::Receiver<Outcome>,
    expected: usize,
    deadline: Instant,
    cancel: &CancellationToken,
    event_tx: &broadcast::Sender<Event>,
) -> ResultSet {
    let mut results = ResultSet::with_capacity(expected);
    if expected == 0 {
        return results;
    }

    let mut state = BatchState::Collecting;
    let sleep = tokio::time::sleep_until(deadline);
    tokio::pin!(sleep);

    while state == BatchState::Collecting {
        tokio::select! {
            maybe_outcome = outcome_rx.recv() => match maybe_outcome {
                Some(outcome) => {
                    match &outcome {
                        Outcome::Success { target, .. } => {
                            tracing::debug!(%target, "outcome received");
                            event_tx
                                .send(Event::TargetCompleted {
                                    target: target.clone(),
                                })
                                .ok();
                        }
                        Outcome::Failure { target, reason } => {
                            tracing::debug!(%target, reason = %reason, "outcome received");
                            event_tx
                                .send(Event::TargetFailed {
                                    target: target.clone(),
                                    reason: reason.clone(),
                                })
                                .ok();
                        }
                    }
                    results.push(outcome);
                    if results.len() == expected {
                        state = BatchState::Done;
                    }
                }
                // Every worker holds a sender until it has reported, so the
                // channel cannot close before the set is full.
                None => state = BatchState::Done,
            },
            _ = &mut sleep => {
                tracing::warn!(
                    received = results.len(),
                    expected,
                    "deadline elapsed with outcomes outstanding"
                );
                event_tx
                    .send(Event::DeadlineExceeded {
                        received: results.len(),
                        total: expected,
                    })
                    .ok();
                results.mark_timed_out();
                cancel.cancel();
                state = BatchState::Done;
            }
        }
    }

    results
}
