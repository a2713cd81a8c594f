//! HTTP transport seam for remote template content

use async_trait::async_trait;
use std::time::Duration;

use super::error::{FetchError, FetchResult};

/// Status and body of a completed GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as UTF-8 text
    pub body: String,
}

impl RawResponse {
    /// Create a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Performs a single unauthenticated GET
///
/// Implementations must not retry. Any status is returned as-is; interpreting
/// it is the caller's job. Only failures to obtain a response at all
/// (connection, TLS, timeout, body decoding) are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET to `url`
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] if no response could be read.
    async fn get(&self, url: &str) -> FetchResult<RawResponse>;
}

/// [`Transport`] backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client with the given per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("initsu/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> FetchResult<RawResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::transport(url, e))?;

        Ok(RawResponse { status, body })
    }
}
