//! Response specification type

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A captured HTTP response.
///
/// Built once by the HTTP adapter and never modified afterwards. The body is
/// parsed as JSON when possible; otherwise `body` is `Value::Null`,
/// `is_json` is false, and the text is kept in `raw_body` for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lowercase names)
    pub headers: HashMap<String, String>,
    /// Parsed JSON body
    pub body: Value,
    /// Whether the body parsed as JSON
    pub is_json: bool,
    /// Body text as received
    pub raw_body: String,
    /// Response time
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl ResponseSpec {
    /// Creates a response, parsing `body_bytes` as JSON if possible.
    #[must_use]
    pub fn new(
        status: u16,
        headers: HashMap<String, String>,
        body_bytes: &[u8],
        duration: Duration,
    ) -> Self {
        let raw_body = String::from_utf8_lossy(body_bytes).into_owned();
        let parsed = serde_json::from_slice::<Value>(body_bytes).ok();

        Self {
            status,
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
            is_json: parsed.is_some(),
            body: parsed.unwrap_or(Value::Null),
            raw_body,
            duration,
        }
    }

    /// Creates a response from an already-parsed JSON body.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            raw_body: body.to_string(),
            is_json: true,
            body,
            duration: Duration::ZERO,
        }
    }

    /// Gets a header value (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns a short preview of the raw body for failure messages.
    #[must_use]
    pub fn body_preview(&self) -> String {
        const MAX: usize = 100;
        match self.raw_body.char_indices().nth(MAX) {
            Some((cut, _)) => format!("{}...", &self.raw_body[..cut]),
            None => self.raw_body.clone(),
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
