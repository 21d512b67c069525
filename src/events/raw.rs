//! Raw diagnostic events.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the diagnostic event source emitted by the HTTP client.
pub const HTTP_EVENT_SOURCE: &str = "Microsoft-System-Net-Http";

/// One event as written by the diagnostic source.
///
/// `payload` is positional and untyped; its shape depends on `event_id`.
/// A `None` payload means the source did not attach one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub event_id: i64,
    pub event_name: String,
    pub source_name: String,
    pub payload: Option<Vec<Value>>,
}

impl RawEvent {
    pub fn new(event_id: i64, event_name: &str, payload: Vec<Value>) -> Self {
        Self {
            event_id,
            event_name: event_name.to_string(),
            source_name: HTTP_EVENT_SOURCE.to_string(),
            payload: Some(payload),
        }
    }

    pub fn payload_len(&self) -> usize {
        self.payload.as_ref().map(|p| p.len()).unwrap_or(0)
    }

    /// Comma-joined payload, used when reporting skipped events.
    pub fn payload_summary(&self) -> String {
        self.payload
            .as_ref()
            .map(|p| {
                p.iter()
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .unwrap_or_default()
    }
}
