//! Dot-addressable lookups into a JSON response body.
//!
//! Accepted forms: `count`, `results.0.name`, `results[0].name`, and the
//! same with a leading `$` or `$.`. An empty path (or bare `$`) addresses the
//! body root.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object key; a numeric key also indexes into arrays.
    Field(String),
    /// Explicit array index from bracket syntax.
    Index(usize),
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Parses a field path.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidFieldPath`] on empty segments, unclosed
    /// brackets or non-numeric indices.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let invalid = |reason: String| DomainError::InvalidFieldPath {
            path: raw.to_string(),
            reason,
        };

        let trimmed = raw.trim();
        let body = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let body = body.strip_prefix('.').unwrap_or(body);

        let mut segments = Vec::new();
        if body.is_empty() {
            return Ok(Self {
                raw: raw.to_string(),
                segments,
            });
        }

        for piece in split_outside_brackets(body) {
            let (name, mut indices) = match piece.find('[') {
                Some(open) => (&piece[..open], &piece[open..]),
                None => (piece, ""),
            };

            if name.is_empty() && indices.is_empty() {
                return Err(invalid("empty segment".to_string()));
            }
            if !name.is_empty() {
                segments.push(PathSegment::Field(name.to_string()));
            }

            while !indices.is_empty() {
                let Some(close) = indices.find(']') else {
                    return Err(invalid("unclosed '['".to_string()));
                };
                if !indices.starts_with('[') {
                    return Err(invalid(format!("unexpected '{indices}'")));
                }
                let index = &indices[1..close];
                let index = index
                    .parse::<usize>()
                    .map_err(|_| invalid(format!("invalid array index '{index}'")))?;
                segments.push(PathSegment::Index(index));
                indices = &indices[close + 1..];
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// Returns the path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Looks the path up in `value`, returning `None` when any step is absent.
    #[must_use]
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match (segment, current) {
                (PathSegment::Field(key), Value::Object(map)) => map.get(key),
                (PathSegment::Field(key), Value::Array(items)) => {
                    key.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
                _ => None,
            })
    }
}

impl FromStr for FieldPath {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.is_empty() {
            f.write_str("$")
        } else {
            f.write_str(&self.raw)
        }
    }
}

/// Splits on `.` except inside `[...]`.
fn split_outside_brackets(path: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in path.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                pieces.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&path[start..]);
    pieces
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn body() -> Value {
        json!({
            "count": 0,
            "name": "",
            "results": [{"name": "stench"}, {"name": "drizzle"}],
            "sprites": {"front_default": null}
        })
    }

    #[test]
    fn test_dot_and_bracket_forms_agree() {
        let body = body();
        for raw in ["results.1.name", "results[1].name", "$.results[1].name", "$results.1.name"] {
            let path = FieldPath::parse(raw).unwrap();
            assert_eq!(path.resolve(&body), Some(&json!("drizzle")), "{raw}");
        }
    }

    #[test]
    fn test_falsy_values_resolve() {
        let body = body();
        assert_eq!(FieldPath::parse("count").unwrap().resolve(&body), Some(&json!(0)));
        assert_eq!(FieldPath::parse("name").unwrap().resolve(&body), Some(&json!("")));
        assert_eq!(
            FieldPath::parse("sprites.front_default").unwrap().resolve(&body),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_missing_steps_resolve_to_none() {
        let body = body();
        for raw in ["missing", "results.5.name", "results[2]", "count.value", "results.x"] {
            assert_eq!(FieldPath::parse(raw).unwrap().resolve(&body), None, "{raw}");
        }
    }

    #[test]
    fn test_root_path() {
        let body = body();
        let root = FieldPath::parse("").unwrap();
        assert!(root.segments().is_empty());
        assert_eq!(root.resolve(&body), Some(&body));
        assert_eq!(root.to_string(), "$");
    }

    #[test]
    fn test_nested_indices() {
        let value = json!({"grid": [[1, 2], [3, 4]]});
        let path = FieldPath::parse("grid[1][0]").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Field("grid".to_string()),
                PathSegment::Index(1),
                PathSegment::Index(0)
            ]
        );
        assert_eq!(path.resolve(&value), Some(&json!(3)));
    }

    #[test]
    fn test_malformed_paths() {
        for raw in ["a..b", "a.", "results[", "results[x]", "results[*]", "results[0]x"] {
            assert!(
                matches!(FieldPath::parse(raw), Err(DomainError::InvalidFieldPath { .. })),
                "{raw} should be rejected"
            );
        }
    }
}
