//! # fanout-fetch
//!
//! Deadline-bounded concurrent fan-out fetch engine.
//!
//! fanout-fetch dispatches a fixed set of independent remote fetch
//! operations in parallel, collects their results through a single
//! synchronization point, and enforces a bounded overall wait time. When
//! the deadline is exceeded it degrades gracefully to a partial result
//! set instead of failing the batch.
//!
//! ## Design Philosophy
//!
//! - **Always answer** - Callers always receive a report, even when every
//!   target fails or the deadline cuts the batch short
//! - **Library-first** - No CLI or server, purely a Rust crate for embedding
//! - **Pluggable transport** - The remote call is an abstract capability;
//!   HTTP is just the built-in implementation
//! - **Event-driven** - Consumers subscribe to lifecycle events, no polling
//!
//! ## Quick Start
//!
//! ```no_run
//! use fanout_fetch::{Config, FanoutEngine, Target};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = FanoutEngine::new(Config::default())?;
//!
//!     let report = engine
//!         .run_batch(vec![
//!             Target::from("https://example.com/a"),
//!             Target::from("https://example.com/b"),
//!         ])
//!         .await;
//!
//!     println!("{}", report.to_json_pretty()?);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Fan-out engine (decomposed into focused submodules)
pub mod engine;
/// Error types
pub mod error;
/// Pluggable remote-call collaborator
pub mod fetch;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{BatchConfig, Config, HttpConfig};
pub use engine::FanoutEngine;
pub use error::{Error, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use types::{BatchReport, BatchState, Event, Outcome, ResultSet, Target, TargetReport};
