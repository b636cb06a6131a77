//! Assertion engine.
//!
//! Evaluates expectations against a captured response. Evaluation never
//! panics: absent fields, malformed paths and non-JSON bodies all produce
//! a failed [`ExpectationResult`] with a reason.

use pokecheck_domain::{Expectation, ExpectationResult, FieldPath, ResponseSpec};
use serde_json::Value;

/// Evaluates expectations against responses.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionEngine;

impl AssertionEngine {
    /// Create a new assertion engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluate every expectation, in order, without stopping at failures.
    #[must_use]
    pub fn assert_all(
        &self,
        expectations: &[Expectation],
        response: &ResponseSpec,
    ) -> Vec<ExpectationResult> {
        expectations
            .iter()
            .map(|expectation| self.evaluate(expectation, response))
            .collect()
    }

    /// Evaluate a single expectation against a response.
    #[must_use]
    pub fn evaluate(
        &self,
        expectation: &Expectation,
        response: &ResponseSpec,
    ) -> ExpectationResult {
        match expectation {
            Expectation::StatusEquals { code } => Self::check_status(expectation, response, *code),
            Expectation::FieldEquals { path, value } => {
                Self::check_field_equals(expectation, response, path, value)
            }
            Expectation::FieldPresent { path } => {
                Self::check_field_present(expectation, response, path)
            }
            Expectation::FieldNonEmpty { path } => {
                Self::check_field_non_empty(expectation, response, path)
            }
            Expectation::FieldAtLeast { path, min } => {
                Self::check_field_at_least(expectation, response, path, *min)
            }
            Expectation::ArrayLengthEquals { path, len } => {
                Self::check_array_length(expectation, response, path, *len)
            }
            Expectation::ArrayElementFieldEquals {
                path,
                index,
                field,
                value,
            } => Self::check_element_field(expectation, response, path, *index, field, value),
        }
    }

    fn check_status(
        expectation: &Expectation,
        response: &ResponseSpec,
        code: u16,
    ) -> ExpectationResult {
        let actual = response.status;
        if actual == code {
            ExpectationResult::pass_with_value(expectation.clone(), actual.to_string())
        } else {
            ExpectationResult::fail_with_value(
                expectation.clone(),
                actual.to_string(),
                format!("expected status {code}, got {actual}"),
            )
        }
    }

    fn check_field_equals(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: &str,
        expected: &Value,
    ) -> ExpectationResult {
        let actual = match lookup(expectation, response, path) {
            Ok(value) => value,
            Err(failure) => return failure,
        };

        if json_eq(actual, expected) {
            ExpectationResult::pass_with_value(expectation.clone(), actual.to_string())
        } else {
            ExpectationResult::fail_with_value(
                expectation.clone(),
                actual.to_string(),
                format!("`{path}`: expected {expected}, got {actual}"),
            )
        }
    }

    fn check_field_present(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: &str,
    ) -> ExpectationResult {
        match lookup(expectation, response, path) {
            Ok(value) => ExpectationResult::pass_with_value(expectation.clone(), preview(value)),
            Err(failure) => failure,
        }
    }

    fn check_field_non_empty(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: &str,
    ) -> ExpectationResult {
        let actual = match lookup(expectation, response, path) {
            Ok(value) => value,
            Err(failure) => return failure,
        };

        match length_of(actual) {
            Some(0) => ExpectationResult::fail_with_value(
                expectation.clone(),
                actual.to_string(),
                format!("`{path}` is empty"),
            ),
            Some(len) => ExpectationResult::pass_with_value(
                expectation.clone(),
                format!("{len} elements"),
            ),
            None => ExpectationResult::fail_with_value(
                expectation.clone(),
                preview(actual),
                format!("`{path}` is {}, expected a collection", type_name(actual)),
            ),
        }
    }

    fn check_field_at_least(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: &str,
        min: f64,
    ) -> ExpectationResult {
        let actual = match lookup(expectation, response, path) {
            Ok(value) => value,
            Err(failure) => return failure,
        };

        match actual.as_f64() {
            Some(number) if number >= min => {
                ExpectationResult::pass_with_value(expectation.clone(), actual.to_string())
            }
            Some(_) => ExpectationResult::fail_with_value(
                expectation.clone(),
                actual.to_string(),
                format!("`{path}`: expected at least {min}, got {actual}"),
            ),
            None => ExpectationResult::fail_with_value(
                expectation.clone(),
                preview(actual),
                format!("`{path}` is {}, expected a number", type_name(actual)),
            ),
        }
    }

    fn check_array_length(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: &str,
        expected: usize,
    ) -> ExpectationResult {
        let items = match lookup_array(expectation, response, path) {
            Ok(items) => items,
            Err(failure) => return failure,
        };

        if items.len() == expected {
            ExpectationResult::pass_with_value(expectation.clone(), items.len().to_string())
        } else {
            ExpectationResult::fail_with_value(
                expectation.clone(),
                items.len().to_string(),
                format!("`{path}`: expected {expected} elements, got {}", items.len()),
            )
        }
    }

    fn check_element_field(
        expectation: &Expectation,
        response: &ResponseSpec,
        path: &str,
        index: usize,
        field: &str,
        expected: &Value,
    ) -> ExpectationResult {
        let items = match lookup_array(expectation, response, path) {
            Ok(items) => items,
            Err(failure) => return failure,
        };

        let Some(element) = items.get(index) else {
            return ExpectationResult::fail_with_value(
                expectation.clone(),
                format!("{} elements", items.len()),
                format!(
                    "`{path}` has {} elements, index {index} is out of bounds",
                    items.len()
                ),
            );
        };

        let field_path = match FieldPath::parse(field) {
            Ok(parsed) => parsed,
            Err(e) => return ExpectationResult::fail(expectation.clone(), e.to_string()),
        };

        match field_path.resolve(element) {
            Some(actual) if json_eq(actual, expected) => {
                ExpectationResult::pass_with_value(expectation.clone(), actual.to_string())
            }
            Some(actual) => ExpectationResult::fail_with_value(
                expectation.clone(),
                actual.to_string(),
                format!("`{path}[{index}].{field}`: expected {expected}, got {actual}"),
            ),
            None => ExpectationResult::fail_with_value(
                expectation.clone(),
                preview(element),
                format!("missing field `{field}` in `{path}[{index}]`"),
            ),
        }
    }
}

/// Resolve `path` in the response body, or build the failure explaining why not.
fn lookup<'a>(
    expectation: &Expectation,
    response: &'a ResponseSpec,
    path: &str,
) -> Result<&'a Value, ExpectationResult> {
    if !response.is_json {
        return Err(ExpectationResult::fail_with_value(
            expectation.clone(),
            response.body_preview(),
            format!("body is not JSON, cannot read `{path}`"),
        ));
    }

    let field_path = FieldPath::parse(path)
        .map_err(|e| ExpectationResult::fail(expectation.clone(), e.to_string()))?;

    field_path.resolve(&response.body).ok_or_else(|| {
        ExpectationResult::fail(expectation.clone(), format!("missing field `{path}`"))
    })
}

fn lookup_array<'a>(
    expectation: &Expectation,
    response: &'a ResponseSpec,
    path: &str,
) -> Result<&'a Vec<Value>, ExpectationResult> {
    let value = lookup(expectation, response, path)?;
    value.as_array().ok_or_else(|| {
        ExpectationResult::fail_with_value(
            expectation.clone(),
            preview(value),
            format!("`{path}` is {}, expected an array", type_name(value)),
        )
    })
}

/// Deep equality where numbers compare by value, so `65` equals `65.0`.
/// Two integers compare exactly, without going through `f64`.
/// Strings compare exactly, case included.
#[allow(clippy::float_cmp)]
fn json_eq(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            if a.is_f64() || b.is_f64() {
                a.as_f64().zip(b.as_f64()).is_some_and(|(x, y)| x == y)
            } else {
                a == b
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_eq(x, y)))
        }
        _ => actual == expected,
    }
}

fn length_of(value: &Value) -> Option<usize> {
    match value {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        Value::String(s) => Some(s.chars().count()),
        _ => None,
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn preview(value: &Value) -> String {
    const MAX: usize = 100;
    let text = value.to_string();
    match text.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
