//! Error types for fanout-fetch
//!
//! Per-task fetch failures are *not* errors: they are captured as
//! [`Outcome::Failure`](crate::types::Outcome) entries in the batch report
//! and never abort the batch. The [`Error`] type covers engine-level
//! problems only: invalid configuration, unusable targets, and failures
//! inside the HTTP collaborator.

use thiserror::Error;

/// Result type alias for fanout-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for fanout-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "timeout")
        key: Option<String>,
    },

    /// Target reference could not be interpreted by the collaborator
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// Network error from the HTTP collaborator
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote call failed for a reason other than transport (custom
    /// collaborators report their failures through this variant)
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Serialization error while rendering a batch report
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
