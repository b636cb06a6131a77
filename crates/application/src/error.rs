//! Application error types

use pokecheck_domain::DomainError;
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
///
/// Only `Configuration` ever aborts a run; transport failures are folded
/// into the failing scenario's result by the runner.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The scenario registry is empty or malformed.
    #[error("configuration error: {0}")]
    Configuration(#[from] DomainError),

    /// The HTTP exchange did not complete.
    #[error("transport error: {0}")]
    Transport(#[from] HttpClientError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
