//! Resource path templates with `:placeholder` segments.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use super::QueryParams;
use crate::error::{DomainError, DomainResult};

/// A relative resource path such as `/api/v2/pokemon/:id`.
///
/// Placeholders are whole path segments starting with `:`. Values are bound
/// from literal fixtures when the scenario is built; a path resolves only when
/// every placeholder is bound and no binding is left over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePath {
    /// Template as declared, e.g. `/api/v2/ability/:name`.
    pub template: String,
    /// Placeholder values keyed by placeholder name (without the colon).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bindings: BTreeMap<String, String>,
}

impl ResourcePath {
    /// Creates a path from a template with no bindings.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            bindings: BTreeMap::new(),
        }
    }

    /// Binds a placeholder value (builder pattern).
    #[must_use]
    pub fn bind(mut self, placeholder: impl Into<String>, value: impl ToString) -> Self {
        self.bindings.insert(placeholder.into(), value.to_string());
        self
    }

    /// Returns the placeholder names declared by the template, in order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.template
            .split('/')
            .filter_map(|segment| segment.strip_prefix(':'))
    }

    /// Resolves the template into concrete, unencoded path segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed, a placeholder is
    /// unbound, or a binding names a placeholder the template lacks.
    pub fn segments(&self) -> DomainResult<Vec<String>> {
        let invalid = |reason: &str| DomainError::InvalidResourcePath {
            path: self.template.clone(),
            reason: reason.to_string(),
        };

        let Some(rest) = self.template.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };
        if self.template.contains("://") {
            return Err(invalid("must be relative, not an absolute URL"));
        }
        if self.template.contains(['?', '#']) {
            return Err(invalid("query and fragment belong in query parameters"));
        }

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(invalid("empty path segment"));
            }
            match segment.strip_prefix(':') {
                Some("") => return Err(invalid("placeholder without a name")),
                Some(name) => {
                    let value = self.bindings.get(name).ok_or_else(|| {
                        DomainError::UnresolvedPlaceholder {
                            path: self.template.clone(),
                            placeholder: name.to_string(),
                        }
                    })?;
                    if value.is_empty() {
                        return Err(invalid("placeholder bound to an empty value"));
                    }
                    if is_dot_segment(value) {
                        return Err(invalid("placeholder bound to a dot segment"));
                    }
                    segments.push(value.clone());
                }
                None if is_dot_segment(segment) => {
                    return Err(invalid("dot segments are not allowed"));
                }
                None => segments.push(segment.to_string()),
            }
        }

        if let Some(unknown) = self
            .bindings
            .keys()
            .find(|name| !self.placeholders().any(|p| p == name.as_str()))
        {
            return Err(DomainError::UnknownPlaceholder {
                path: self.template.clone(),
                placeholder: unknown.clone(),
            });
        }

        Ok(segments)
    }

    /// Resolves this path and `query` against `base` into one URL.
    ///
    /// Segments and query values are percent-encoded; query pairs follow
    /// key order, so the result is deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not resolve or `base` cannot carry
    /// a path (e.g. `mailto:`).
    pub fn resolve_url(&self, base: &Url, query: &QueryParams) -> DomainResult<Url> {
        let segments = self.segments()?;

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|()| DomainError::InvalidUrl(format!("{base} cannot be a base URL")))?
            .pop_if_empty()
            .extend(segments.iter());

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        Ok(url)
    }
}

/// `.` and `..` would be collapsed by URL normalisation, changing the target.
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl fmt::Display for ResourcePath {
    /// Renders the template with bound placeholders substituted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<&str> = self
            .template
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix(':')
                    .and_then(|name| self.bindings.get(name))
                    .map_or(segment, String::as_str)
            })
            .collect();
        f.write_str(&rendered.join("/"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("https://pokeapi.co").unwrap()
    }

    #[test]
    fn test_resolves_bound_placeholder() {
        let path = ResourcePath::new("/api/v2/pokemon/:id").bind("id", 104);

        assert_eq!(path.segments().unwrap(), vec!["api", "v2", "pokemon", "104"]);
        assert_eq!(path.to_string(), "/api/v2/pokemon/104");
    }

    #[test]
    fn test_resolve_url_with_query() {
        let path = ResourcePath::new("/api/v2/ability");
        let query = QueryParams::new().with("limit", 9);

        let url = path.resolve_url(&base(), &query).unwrap();
        assert_eq!(url.as_str(), "https://pokeapi.co/api/v2/ability?limit=9");
    }

    #[test]
    fn test_resolve_url_is_deterministic() {
        let path = ResourcePath::new("/api/v2/pokemon");
        let a = QueryParams::new().with("offset", 20).with("limit", 5);
        let b = QueryParams::new().with("limit", 5).with("offset", 20);

        assert_eq!(
            path.resolve_url(&base(), &a).unwrap(),
            path.resolve_url(&base(), &b).unwrap()
        );
    }

    #[test]
    fn test_resolve_url_keeps_base_prefix() {
        let base = Url::parse("http://127.0.0.1:8080/mirror/").unwrap();
        let path = ResourcePath::new("/api/v2/ability/:name").bind("name", "flame-body");

        let url = path.resolve_url(&base, &QueryParams::new()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/mirror/api/v2/ability/flame-body"
        );
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let path = ResourcePath::new("/api/v2/pokemon/:name").bind("name", "mr mime/x");
        let query = QueryParams::new().with("q", "a&b");

        let url = path.resolve_url(&base(), &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://pokeapi.co/api/v2/pokemon/mr%20mime%2Fx?q=a%26b"
        );
    }

    #[test]
    fn test_case_is_preserved() {
        let path = ResourcePath::new("/api/v2/ability/:name").bind("name", "flameBody");
        let url = path.resolve_url(&base(), &QueryParams::new()).unwrap();
        assert!(url.as_str().ends_with("/flameBody"));
    }

    #[test]
    fn test_unbound_placeholder_is_rejected() {
        let path = ResourcePath::new("/api/v2/pokemon/:id");
        assert!(matches!(
            path.segments(),
            Err(DomainError::UnresolvedPlaceholder { placeholder, .. }) if placeholder == "id"
        ));
    }

    #[test]
    fn test_unknown_binding_is_rejected() {
        let path = ResourcePath::new("/api/v2/pokemon/:id").bind("id", 1).bind("name", "x");
        assert!(matches!(
            path.segments(),
            Err(DomainError::UnknownPlaceholder { placeholder, .. }) if placeholder == "name"
        ));
    }

    #[test]
    fn test_malformed_templates() {
        for template in [
            "api/v2",
            "/api//v2",
            "/api/v2?limit=1",
            "https://x/api",
            "/api/:",
            "/api/v2/pokemon/..",
            "/api/./v2",
        ] {
            assert!(
                matches!(
                    ResourcePath::new(template).segments(),
                    Err(DomainError::InvalidResourcePath { .. })
                ),
                "{template} should be rejected"
            );
        }
    }

    #[test]
    fn test_dot_segment_bindings_are_rejected() {
        for value in [".", ".."] {
            let path = ResourcePath::new("/api/v2/pokemon/:name").bind("name", value);
            assert!(
                matches!(path.segments(), Err(DomainError::InvalidResourcePath { .. })),
                "{value} should be rejected"
            );
            assert!(path.resolve_url(&base(), &QueryParams::new()).is_err());
        }

        let dotted = ResourcePath::new("/api/v2/pokemon/:name").bind("name", "mr.mime");
        assert_eq!(
            dotted.segments().unwrap(),
            vec!["api", "v2", "pokemon", "mr.mime"]
        );
    }
}
