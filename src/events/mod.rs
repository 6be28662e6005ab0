//! Key event input: the `{type, key, timestamp}` records captured by the browser hook.
//! Decoding is lenient; anything that is not a usable press or release degrades to
//! [`KeyEventType::Other`] or a missing key instead of failing the whole session.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEventType {
    KeyDown,
    KeyUp,
    /// Missing or unrecognised `type`. Still part of the session span.
    #[default]
    #[serde(other)]
    Other,
}

/// One observed hardware event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    #[serde(rename = "type", default, deserialize_with = "lenient_type")]
    pub event_type: KeyEventType,
    /// Logical key identifier (`KeyboardEvent.key`). `None` never matches a pending press.
    #[serde(default, deserialize_with = "lenient_key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Milliseconds since a session-relative epoch
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
}

impl KeyEvent {
    pub fn new(event_type: KeyEventType, key: impl Into<String>, timestamp_ms: f64) -> Self {
        Self {
            event_type,
            key: Some(key.into()),
            timestamp_ms,
        }
    }

    pub fn key_down(key: impl Into<String>, timestamp_ms: f64) -> Self {
        Self::new(KeyEventType::KeyDown, key, timestamp_ms)
    }

    pub fn key_up(key: impl Into<String>, timestamp_ms: f64) -> Self {
        Self::new(KeyEventType::KeyUp, key, timestamp_ms)
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

fn lenient_type<'de, D>(deserializer: D) -> Result<KeyEventType, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw.as_str() {
        Some("keydown") => KeyEventType::KeyDown,
        Some("keyup") => KeyEventType::KeyUp,
        _ => KeyEventType::Other,
    })
}

fn lenient_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(match raw {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// A captured typing session plus any numeric side fields sent with it (e.g. `retry_count`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub events: Vec<KeyEvent>,
    pub extras: BTreeMap<String, f64>,
}

/// Parse a JSON array of key events
pub fn parse_events(json: &str) -> Result<Vec<KeyEvent>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parse either a bare event array or `{ "events": [...], ...extras }`.
/// Non-numeric extras are dropped. Errors name the offending event field.
pub fn parse_session(json: &str) -> Result<Session, serde_json::Error> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(events) => Ok(Session {
            events: decode_events(events)?,
            extras: BTreeMap::new(),
        }),
        Value::Object(mut fields) => {
            let events = match fields.remove("events") {
                Some(Value::Array(events)) => decode_events(events)?,
                Some(_) => return Err(serde::de::Error::custom("`events` must be an array")),
                None => return Err(serde::de::Error::missing_field("events")),
            };
            let extras = fields
                .into_iter()
                .filter_map(|(k, v)| v.as_f64().map(|n| (k, n)))
                .collect();
            Ok(Session { events, extras })
        }
        _ => Err(serde::de::Error::custom(
            "expected an event array or an object with `events`",
        )),
    }
}

fn decode_events(raw: Vec<Value>) -> Result<Vec<KeyEvent>, serde_json::Error> {
    raw.into_iter().map(serde_json::from_value).collect()
}
