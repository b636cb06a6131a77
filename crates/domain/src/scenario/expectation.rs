//! Expectations checked against a captured response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single checkable condition against a response.
///
/// Paths are [`FieldPath`](crate::FieldPath) strings resolved against the
/// JSON body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Status code equals `code` exactly.
    StatusEquals {
        /// Expected status code.
        code: u16,
    },
    /// Value at `path` deep-equals `value`.
    FieldEquals {
        /// Field path.
        path: String,
        /// Expected value.
        value: Value,
    },
    /// `path` resolves to any value, including `0`, `""` and `null`.
    FieldPresent {
        /// Field path.
        path: String,
    },
    /// Value at `path` is a non-empty array, object or string.
    FieldNonEmpty {
        /// Field path.
        path: String,
    },
    /// Value at `path` is a number no smaller than `min`.
    FieldAtLeast {
        /// Field path.
        path: String,
        /// Inclusive lower bound.
        min: f64,
    },
    /// Value at `path` is an array of exactly `len` elements.
    ArrayLengthEquals {
        /// Field path.
        path: String,
        /// Expected length.
        len: usize,
    },
    /// Element `index` of the array at `path` has `field` equal to `value`.
    ArrayElementFieldEquals {
        /// Path of the array.
        path: String,
        /// Element index.
        index: usize,
        /// Field path inside the element.
        field: String,
        /// Expected value.
        value: Value,
    },
}

impl Expectation {
    /// Status code equals `code`.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::StatusEquals { code }
    }

    /// Field at `path` equals `value`.
    #[must_use]
    pub fn field_equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEquals {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Field at `path` is present.
    #[must_use]
    pub fn field_present(path: impl Into<String>) -> Self {
        Self::FieldPresent { path: path.into() }
    }

    /// Field at `path` is not empty.
    #[must_use]
    pub fn field_non_empty(path: impl Into<String>) -> Self {
        Self::FieldNonEmpty { path: path.into() }
    }

    /// Field at `path` is at least `min`.
    #[must_use]
    pub fn field_at_least(path: impl Into<String>, min: impl Into<f64>) -> Self {
        Self::FieldAtLeast {
            path: path.into(),
            min: min.into(),
        }
    }

    /// Array at `path` has exactly `len` elements.
    #[must_use]
    pub fn array_length(path: impl Into<String>, len: usize) -> Self {
        Self::ArrayLengthEquals {
            path: path.into(),
            len,
        }
    }

    /// Element `index` of the array at `path` has `field` equal to `value`.
    #[must_use]
    pub fn element_field_equals(
        path: impl Into<String>,
        index: usize,
        field: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self::ArrayElementFieldEquals {
            path: path.into(),
            index,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Field paths this expectation reads, for up-front validation.
    #[must_use]
    pub fn field_paths(&self) -> Vec<&str> {
        match self {
            Self::StatusEquals { .. } => Vec::new(),
            Self::FieldEquals { path, .. }
            | Self::FieldPresent { path }
            | Self::FieldNonEmpty { path }
            | Self::FieldAtLeast { path, .. }
            | Self::ArrayLengthEquals { path, .. } => vec![path.as_str()],
            Self::ArrayElementFieldEquals { path, field, .. } => {
                vec![path.as_str(), field.as_str()]
            }
        }
    }

    /// Get a human-readable description of this expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::StatusEquals { code } => format!("status code is {code}"),
            Self::FieldEquals { path, value } => format!("`{path}` equals {value}"),
            Self::FieldPresent { path } => format!("`{path}` is present"),
            Self::FieldNonEmpty { path } => format!("`{path}` is not empty"),
            Self::FieldAtLeast { path, min } => format!("`{path}` is at least {min}"),
            Self::ArrayLengthEquals { path, len } => format!("`{path}` has {len} elements"),
            Self::ArrayElementFieldEquals {
                path,
                index,
                field,
                value,
            } => format!("`{path}[{index}].{field}` equals {value}"),
        }
    }
}
