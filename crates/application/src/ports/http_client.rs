//! HTTP Client port

use async_trait::async_trait;
use pokecheck_domain::{QueryParams, ResourcePath, ResponseSpec};
use thiserror::Error;
use url::Url;

/// Transport-level failures: the HTTP exchange did not complete.
///
/// A response with any status code, 4xx and 5xx included, is not an error
/// here; only failures to obtain a response are.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No response within the per-request timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// Host name could not be resolved.
    #[error("could not resolve host '{host}': {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Underlying message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason (TLS, reset, ...).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Redirect limit exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for issuing GET requests against the API under test.
///
/// Implementations perform one real network call per `get`, without
/// retries, bounded by their own per-request timeout.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Base URL every resource path is resolved against.
    fn base_url(&self) -> &Url;

    /// Issues a GET to a fully resolved URL.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was obtained.
    async fn get(&self, url: &Url) -> Result<ResponseSpec, HttpClientError>;

    /// Resolves `path` and `query` against the base URL and issues a GET.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::InvalidUrl`] if the path does not resolve,
    /// otherwise whatever [`HttpClient::get`] returns.
    async fn fetch(
        &self,
        path: &ResourcePath,
        query: &QueryParams,
    ) -> Result<ResponseSpec, HttpClientError> {
        let url = path
            .resolve_url(self.base_url(), query)
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        self.get(&url).await
    }
}
