//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It performs one GET per call: no retries, no caching, a fixed
//! per-request timeout.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pokecheck_application::ports::{HttpClient, HttpClientError};
use pokecheck_domain::ResponseSpec;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::config::Settings;

/// Redirects followed before giving up.
const MAX_REDIRECTS: usize = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps `reqwest::Client` together with the base URL and timeout the
/// harness was configured with.
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestHttpClient {
    /// Creates a new HTTP client from settings.
    ///
    /// Configuration:
    /// - Request timeout: `settings.timeout`
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "pokecheck/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(settings: &Settings) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("pokecheck/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(settings.timeout)
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client, settings))
    }

    /// Creates a new HTTP client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            base_url: settings.base_url.clone(),
            timeout: settings.timeout,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Maps reqwest errors to the port's `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        if error.is_body() || error.is_decode() {
            return HttpClientError::Body(error_chain(error));
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Renders an error with its sources, so "connection refused" from the OS
/// is not hidden behind reqwest's generic message.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get(&self, url: &Url) -> Result<ResponseSpec, HttpClientError> {
        let timeout_ms = self.timeout_ms();
        debug!(%url, timeout_ms, "GET");

        let start = Instant::now();

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let duration = start.elapsed();
        debug!(%url, status, bytes = body.len(), ?duration, "response received");

        Ok(ResponseSpec::new(status, headers, &body, duration))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_client_creation() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        let client = ReqwestHttpClient::new(&settings);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_uses_configured_base_url() {
        let settings = Settings {
            base_url: Url::parse("http://127.0.0.1:9/").unwrap(),
            timeout: Duration::from_millis(250),
        };
        let client = ReqwestHttpClient::new(&settings).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9/");
        assert_eq!(client.timeout_ms(), 250);
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let outer = std::io::Error::other(inner);
        assert!(error_chain(&outer).contains("refused"));
    }
}
