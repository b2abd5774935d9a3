//! Pluggable remote-call collaborator
//!
//! The engine consumes "execute one remote call for a target, return a
//! payload or failure description" as an abstract capability. [`Fetcher`]
//! is that seam; [`HttpFetcher`] is the built-in HTTP implementation.
//! Transport concerns (TLS, redirects, connection pooling) live entirely
//! inside the collaborator; the coordination core never sees them.

use crate::config::HttpConfig;
use crate::error::{Error, Result};
use crate::types::Target;
use async_trait::async_trait;

/// Executes a single remote call for one target
///
/// Implementations must be cheap to share across worker tasks (the engine
/// holds one instance behind an `Arc` and every worker calls into it
/// concurrently). A failed call is an ordinary `Err`; the worker converts
/// it into a failure outcome, so implementations never need to retry or
/// swallow their own errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform the remote call for `target`, returning the opaque payload
    async fn fetch(&self, target: &Target) -> Result<String>;

    /// Name of this collaborator implementation, for diagnostics
    fn name(&self) -> &str {
        "custom"
    }
}

/// HTTP GET collaborator backed by a shared reqwest client
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build an HTTP fetcher from collaborator configuration
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone());

        if let Some(request_timeout) = config.request_timeout {
            builder = builder.timeout(request_timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, target: &Target) -> Result<String> {
        let url = url::Url::parse(target.as_str())
            .map_err(|e| Error::InvalidTarget(format!("{}: {}", target, e)))?;

        let response = self.client.get(url).send().await?.error_for_status()?;
        let payload = response.text().await?;

        tracing::debug!(%target, bytes = payload.len(), "fetch completed");
        Ok(payload)
    }

    fn name(&self) -> &str {
        "http"
    }
}
