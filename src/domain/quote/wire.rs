//! Wire types for quote documents (HTTP).
//!
//! The provider's payload is kept as an opaque JSON object: the series key
//! depends on the requested interval, error bodies arrive with a 200 status,
//! and individual records may be incomplete. Typed access happens in
//! `convert.rs`, which tolerates every one of those shapes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the provider uses for human-readable error bodies.
const UPSTREAM_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

pub const OPEN_FIELD: &str = "1. open";
pub const HIGH_FIELD: &str = "2. high";
pub const LOW_FIELD: &str = "3. low";
pub const CLOSE_FIELD: &str = "4. close";
pub const VOLUME_FIELD: &str = "5. volume";

/// A freshly fetched quote payload. Never merged with a previous one.
///
/// Key order is the document order (newest series entry first).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteDocument(Map<String, Value>);

impl QuoteDocument {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap an arbitrary JSON value. Non-object bodies are not documents.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Provider-side error or throttling text, if the body carries one.
    pub fn upstream_message(&self) -> Option<&str> {
        UPSTREAM_MESSAGE_KEYS
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_str))
    }

    /// `"Meta Data" / "3. Last Refreshed"`, when present and well-formed.
    pub fn last_refreshed(&self) -> Option<NaiveDateTime> {
        let raw = self
            .0
            .get("Meta Data")?
            .get("3. Last Refreshed")?
            .as_str()?;
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&format!("{raw} 00:00:00"), "%Y-%m-%d %H:%M:%S"))
            .ok()
    }
}

/// One OHLCV record as the provider sends it: every field a string.
///
/// Fields are optional so a partial record still deserializes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireOhlcv {
    #[serde(rename = "1. open", default)]
    pub open: Option<String>,
    #[serde(rename = "2. high", default)]
    pub high: Option<String>,
    #[serde(rename = "3. low", default)]
    pub low: Option<String>,
    #[serde(rename = "4. close", default)]
    pub close: Option<String>,
    #[serde(rename = "5. volume", default)]
    pub volume: Option<String>,
}

impl WireOhlcv {
    /// Lenient extraction from an arbitrary record value.
    ///
    /// Non-object records yield an empty record; non-string fields are absent.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            open: field(OPEN_FIELD),
            high: field(HIGH_FIELD),
            low: field(LOW_FIELD),
            close: field(CLOSE_FIELD),
            volume: field(VOLUME_FIELD),
        }
    }
}
