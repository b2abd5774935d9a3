//! Shared test doubles for engine unit tests.

use crate::config::{BatchConfig, Config};
use crate::engine::FanoutEngine;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::types::Target;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Scripted behavior for one target.
#[derive(Clone)]
pub(crate) enum Behavior {
    /// Succeed with the given payload after the delay.
    Succeed { payload: String, delay: Duration },
    /// Fail with the given reason after the delay.
    Fail { reason: String, delay: Duration },
    /// Never report.
    Hang,
}

/// Fetcher driven by a per-target behavior table.
pub(crate) struct ScriptedFetcher {
    behaviors: HashMap<String, Behavior>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
        }
    }

    pub(crate) fn on(mut self, target: &str, behavior: Behavior) -> Self {
        self.behaviors.insert(target.to_string(), behavior);
        self
    }

    pub(crate) fn succeed(self, target: &str, payload: &str) -> Self {
        self.on(
            target,
            Behavior::Succeed {
                payload: payload.to_string(),
                delay: Duration::ZERO,
            },
        )
    }

    pub(crate) fn succeed_after(self, target: &str, payload: &str, delay: Duration) -> Self {
        self.on(
            target,
            Behavior::Succeed {
                payload: payload.to_string(),
                delay,
            },
        )
    }

    pub(crate) fn fail(self, target: &str, reason: &str) -> Self {
        self.on(
            target,
            Behavior::Fail {
                reason: reason.to_string(),
                delay: Duration::ZERO,
            },
        )
    }

    pub(crate) fn hang(self, target: &str) -> Self {
        self.on(target, Behavior::Hang)
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, target: &Target) -> Result<String> {
        let behavior = self
            .behaviors
            .get(target.as_str())
            .cloned()
            .unwrap_or(Behavior::Fail {
                reason: format!("no behavior scripted for {target}"),
                delay: Duration::ZERO,
            });

        match behavior {
            Behavior::Succeed { payload, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Ok(payload)
            }
            Behavior::Fail { reason, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                Err(Error::Fetch(reason))
            }
            Behavior::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Build an engine around a scripted fetcher with the given batch timeout.
pub(crate) fn engine_with(fetcher: ScriptedFetcher, timeout: Duration) -> FanoutEngine {
    let config = Config {
        batch: BatchConfig {
            timeout,
            ..Default::default()
        },
        ..Default::default()
    };
    FanoutEngine::with_fetcher(config, Arc::new(fetcher)).expect("valid test config")
}
