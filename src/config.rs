//! Configuration types for fanout-fetch

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batch behavior configuration (deadline, event delivery)
///
/// Groups settings that govern a single fan-out invocation. Used as a
/// nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Total wall-clock budget for one batch, measured from the moment
    /// dispatch begins (default: 10 seconds)
    ///
    /// The deadline is fixed per invocation: it is not refreshed per
    /// target and not extendable. When it elapses, outcomes received so
    /// far are kept and the report is marked truncated.
    #[serde(default = "default_timeout", with = "duration_serde")]
    pub timeout: Duration,

    /// Buffer size of the lifecycle event broadcast channel (default: 256)
    ///
    /// Subscribers that fall behind by more than this many events receive
    /// a `RecvError::Lagged` from the broadcast receiver.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            event_buffer: default_event_buffer(),
        }
    }
}

/// HTTP collaborator configuration
///
/// Applies only to the built-in [`HttpFetcher`](crate::fetch::HttpFetcher);
/// custom collaborators injected via
/// [`FanoutEngine::with_fetcher`](crate::engine::FanoutEngine::with_fetcher)
/// ignore these settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// TCP connect timeout for each remote call (default: 5 seconds)
    #[serde(default = "default_connect_timeout", with = "duration_serde")]
    pub connect_timeout: Duration,

    /// Optional per-request timeout (None = bounded only by the batch
    /// deadline)
    #[serde(default, with = "optional_duration_serde")]
    pub request_timeout: Option<Duration>,

    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            request_timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Main configuration for [`FanoutEngine`](crate::engine::FanoutEngine)
///
/// Sub-config fields are flattened for serialization, so the JSON/TOML
/// format stays flat (no nesting).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Batch behavior settings (deadline, event delivery)
    #[serde(flatten)]
    pub batch: BatchConfig,

    /// HTTP collaborator settings
    #[serde(flatten)]
    pub http: HttpConfig,
}

impl Config {
    /// Validate the configuration, returning the first offending setting
    pub fn validate(&self) -> Result<()> {
        if self.batch.timeout.is_zero() {
            return Err(Error::Config {
                message: "timeout must be greater than zero".to_string(),
                key: Some("timeout".to_string()),
            });
        }
        if self.batch.event_buffer == 0 {
            return Err(Error::Config {
                message: "event_buffer must be greater than zero".to_string(),
                key: Some("event_buffer".to_string()),
            });
        }
        if self.http.connect_timeout.is_zero() {
            return Err(Error::Config {
                message: "connect_timeout must be greater than zero".to_string(),
                key: Some("connect_timeout".to_string()),
            });
        }
        Ok(())
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_event_buffer() -> usize {
    256
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_user_agent() -> String {
    concat!("fanout-fetch/", env!("CARGO_PKG_VERSION")).to_string()
}

// Duration serialization helper (seconds as u64)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
