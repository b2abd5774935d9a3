//! Basic fan-out example: fetch a handful of URLs under one deadline and
//! print the rendered report.
//!
//! Run with: cargo run --example basic_batch

use fanout_fetch::{BatchConfig, Config, Event, FanoutEngine, Target};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config {
        batch: BatchConfig {
            timeout: Duration::from_secs(3),
            ..Default::default()
        },
        ..Default::default()
    };

    let engine = FanoutEngine::new(config)?;

    // Watch the batch lifecycle while it runs
    let mut events = engine.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::BatchStarted { total } => println!("dispatched {total} targets"),
                Event::TargetCompleted { target } => println!("done: {target}"),
                Event::TargetFailed { target, reason } => println!("failed: {target} ({reason})"),
                Event::DeadlineExceeded { received, total } => {
                    println!("deadline hit with {received}/{total} received")
                }
                Event::BatchFinished { received, truncated } => {
                    println!("finished: {received} outcomes, truncated={truncated}")
                }
            }
        }
    });

    let report = engine
        .run_batch(vec![
            Target::from("https://example.com/"),
            Target::from("https://www.rust-lang.org/"),
            Target::from("https://httpbin.org/delay/10"),
        ])
        .await;

    println!("{}", report.to_json_pretty()?);
    Ok(())
}
