//! Runtime settings.
//!
//! The harness has no config file. Two environment variables may override
//! the defaults so the same suite can target a mirror or a slow network:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `POKECHECK_BASE_URL` | `https://pokeapi.co` |
//! | `POKECHECK_TIMEOUT_SECS` | `60` |

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "POKECHECK_BASE_URL";
/// Environment variable overriding the per-request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "POKECHECK_TIMEOUT_SECS";

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Invalid environment override.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The base URL does not parse or is not http(s).
    #[error("POKECHECK_BASE_URL='{value}' is not a valid base URL: {reason}")]
    InvalidBaseUrl {
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The timeout is not a positive whole number of seconds.
    #[error("POKECHECK_TIMEOUT_SECS='{value}' is not a valid timeout: {reason}")]
    InvalidTimeout {
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Settings for one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL every resource path is resolved against.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Settings {
    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(BASE_URL_VAR);
        let mut settings = Self {
            base_url: parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim())?,
            timeout: DEFAULT_TIMEOUT,
        };

        if let Some(raw) = get(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| SettingsError::InvalidTimeout {
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
            if secs == 0 {
                return Err(SettingsError::InvalidTimeout {
                    value: raw,
                    reason: "must be greater than zero".to_string(),
                });
            }
            settings.timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    /// Timeout in milliseconds, for error reporting.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

fn parse_base_url(raw: &str) -> Result<Url, SettingsError> {
    let invalid = |reason: String| SettingsError::InvalidBaseUrl {
        value: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings.base_url.as_str(), "https://pokeapi.co/");
        assert_eq!(settings.timeout, Duration::from_secs(60));
        assert_eq!(settings.timeout_ms(), 60_000);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://127.0.0.1:8080/mirror/"),
            (TIMEOUT_VAR, " 5 "),
        ]))
        .unwrap();
        assert_eq!(settings.base_url.as_str(), "http://127.0.0.1:8080/mirror/");
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let settings =
            Settings::from_lookup(lookup(&[(BASE_URL_VAR, "  "), (TIMEOUT_VAR, "")])).unwrap();
        assert_eq!(settings, Settings::from_lookup(lookup(&[])).unwrap());
    }

    #[test]
    fn test_invalid_base_url() {
        for raw in ["not a url", "ftp://pokeapi.co", "https://pokeapi.co/?x=1"] {
            assert!(
                matches!(
                    Settings::from_lookup(lookup(&[(BASE_URL_VAR, raw)])),
                    Err(SettingsError::InvalidBaseUrl { .. })
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_timeout() {
        for raw in ["0", "-1", "ten", "1.5"] {
            assert!(
                matches!(
                    Settings::from_lookup(lookup(&[(TIMEOUT_VAR, raw)])),
                    Err(SettingsError::InvalidTimeout { .. })
                ),
                "{raw} should be rejected"
            );
        }
    }
}
