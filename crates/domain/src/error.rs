//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building or validating a scenario registry.
///
/// Every variant describes a configuration problem: the suite cannot be run
/// until the registry is fixed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The base URL or resolved request URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A resource path template is malformed.
    #[error("invalid resource path '{path}': {reason}")]
    InvalidResourcePath {
        /// The offending template.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A placeholder in a resource path has no bound value.
    #[error("unresolved placeholder ':{placeholder}' in '{path}'")]
    UnresolvedPlaceholder {
        /// The template containing the placeholder.
        path: String,
        /// Placeholder name without the leading colon.
        placeholder: String,
    },

    /// A value was bound to a placeholder the template does not contain.
    #[error("unknown placeholder ':{placeholder}' bound for '{path}'")]
    UnknownPlaceholder {
        /// The template the binding was made against.
        path: String,
        /// Placeholder name without the leading colon.
        placeholder: String,
    },

    /// A field path used by an expectation cannot be parsed.
    #[error("invalid field path '{path}': {reason}")]
    InvalidFieldPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The suite contains no scenarios at all.
    #[error("suite '{0}' has no scenarios registered")]
    EmptySuite(String),

    /// A resource group contains no case groups.
    #[error("resource group '{0}' has no cases")]
    EmptyResourceGroup(String),

    /// A scenario declares no expectations and would pass vacuously.
    #[error("case '{case}' in '{resource}' has no expectations")]
    NoExpectations {
        /// Resource group name.
        resource: String,
        /// Case group name.
        case: String,
    },

    /// Two case groups in one resource group share a name.
    #[error("duplicate case '{case}' in '{resource}'")]
    DuplicateCase {
        /// Resource group name.
        resource: String,
        /// Case group name.
        case: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
