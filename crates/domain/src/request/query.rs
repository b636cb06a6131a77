//! Query parameter types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Query parameters attached to a scenario request.
///
/// Keys are kept sorted so the same set of parameters always produces the
/// same query string, whatever order they were added in. Adding a key twice
/// replaces the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParams {
    items: BTreeMap<String, String>,
}

impl QueryParams {
    /// Creates an empty query parameter collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Sets a query parameter, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.items.insert(key.into(), value.to_string());
    }

    /// Sets a query parameter (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Iterates parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let a = QueryParams::new().with("limit", 9).with("offset", 0);
        let b = QueryParams::new().with("offset", 0).with("limit", 9);

        assert_eq!(a, b);
        assert_eq!(
            a.iter().collect::<Vec<_>>(),
            vec![("limit", "9"), ("offset", "0")]
        );
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut params = QueryParams::new();
        params.insert("limit", 9);
        params.insert("limit", 0);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("limit"), Some("0"));
    }

    #[test]
    fn test_from_iter() {
        let params: QueryParams = [("limit", "20")].into_iter().collect();
        assert_eq!(params.get("limit"), Some("20"));
        assert!(!params.is_empty());
    }
}
