use crate::engine::coordinator;
use crate::types::{Event, Outcome, Target};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn success(target: &str) -> Outcome {
    Outcome::Success {
        target: Target::from(target),
        payload: format!("{target} body"),
    }
}

#[tokio::test]
async fn collects_every_outcome_then_stops() {
    let (tx, rx) = mpsc::channel(3);
    let (event_tx, _keep) = broadcast::channel(16);
    let cancel = CancellationToken::new();

    for name in ["t1", "t2", "t3"] {
        tx.send(success(name)).await.unwrap();
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    let results = coordinator::collect(rx, 3, deadline, &cancel, &event_tx).await;

    assert_eq!(results.len(), 3);
    assert!(!results.timed_out());
    assert!(
        !cancel.is_cancelled(),
        "a fully collected batch must not cancel its workers"
    );
}

#[tokio::test]
async fn outcomes_are_recorded_in_arrival_order_not_dispatch_order() {
    let (tx, rx) = mpsc::channel(3);
    let (event_tx, _keep) = broadcast::channel(16);
    let cancel = CancellationToken::new();

    // Completion order deliberately differs from any natural target order
    for name in ["t3", "t1", "t2"] {
        tx.send(success(name)).await.unwrap();
    }

    let deadline = Instant::now() + Duration::from_secs(5);
    let results = coordinator::collect(rx, 3, deadline, &cancel, &event_tx).await;

    let order: Vec<&str> = results
        .outcomes()
        .iter()
        .map(|o| o.target().as_str())
        .collect();
    assert_eq!(order, vec!["t3", "t1", "t2"]);
}

#[tokio::test]
async fn deadline_keeps_partial_results_and_cancels_workers() {
    let (tx, rx) = mpsc::channel(2);
    let (event_tx, mut events) = broadcast::channel(16);
    let cancel = CancellationToken::new();

    // t1 reports, t2 never does
    tx.send(success("t1")).await.unwrap();

    let deadline = Instant::now() + Duration::from_millis(50);
    let results = coordinator::collect(rx, 2, deadline, &cancel, &event_tx).await;

    assert_eq!(results.len(), 1, "only the received outcome is kept");
    assert!(results.timed_out());
    assert_eq!(results.outcomes()[0].target().as_str(), "t1");
    assert!(
        cancel.is_cancelled(),
        "deadline must cancel outstanding workers"
    );

    // The receiver is gone: a late outcome has nowhere to land
    let late = tx.send(success("t2")).await;
    assert!(late.is_err(), "late outcome must be discarded, not appended");

    // Completion event for t1, then the deadline event
    assert!(matches!(
        events.try_recv().unwrap(),
        Event::TargetCompleted { .. }
    ));
    match events.try_recv().unwrap() {
        Event::DeadlineExceeded { received, total } => {
            assert_eq!(received, 1);
            assert_eq!(total, 2);
        }
        other => panic!("expected DeadlineExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_batch_completes_immediately_without_waiting() {
    let (_tx, rx) = mpsc::channel::<Outcome>(1);
    let (event_tx, _keep) = broadcast::channel(16);
    let cancel = CancellationToken::new();

    let start = std::time::Instant::now();
    let deadline = Instant::now() + Duration::from_secs(60);
    let results = coordinator::collect(rx, 0, deadline, &cancel, &event_tx).await;

    assert!(results.is_empty());
    assert!(!results.timed_out());
    assert!(
        start.elapsed() < Duration::from_secs(1),
        "an empty batch must not wait for the deadline"
    );
}

#[tokio::test]
async fn full_set_arriving_just_before_deadline_is_not_truncated() {
    let (tx, rx) = mpsc::channel(1);
    let (event_tx, _keep) = broadcast::channel(16);
    let cancel = CancellationToken::new();

    let deadline = Instant::now() + Duration::from_millis(200);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(success("t1")).await.ok();
    });

    let results = coordinator::collect(rx, 1, deadline, &cancel, &event_tx).await;

    assert_eq!(results.len(), 1);
    assert!(!results.timed_out());
}
