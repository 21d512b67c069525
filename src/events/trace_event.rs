//! Typed trace events.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Correlation key the HTTP client assigns to each outbound request.
pub type RequestId = i64;

/// Event type codes of the HTTP client's diagnostic source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceEventType {
    Unknown,
    Enter,
    Exit,
    Associate,
    Info,
    Error,
    UriBaseAddress,
    ClientSendCompleted,
    HandlerMessage,
}

impl TraceEventType {
    pub fn code(&self) -> i64 {
        match self {
            TraceEventType::Unknown => 0,
            TraceEventType::Enter => 1,
            TraceEventType::Exit => 2,
            TraceEventType::Associate => 3,
            TraceEventType::Info => 4,
            TraceEventType::Error => 5,
            TraceEventType::UriBaseAddress => 17,
            TraceEventType::ClientSendCompleted => 19,
            TraceEventType::HandlerMessage => 21,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TraceEventType::Unknown),
            1 => Some(TraceEventType::Enter),
            2 => Some(TraceEventType::Exit),
            3 => Some(TraceEventType::Associate),
            4 => Some(TraceEventType::Info),
            5 => Some(TraceEventType::Error),
            17 => Some(TraceEventType::UriBaseAddress),
            19 => Some(TraceEventType::ClientSendCompleted),
            21 => Some(TraceEventType::HandlerMessage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TraceEventType::Unknown => "Unknown",
            TraceEventType::Enter => "Enter",
            TraceEventType::Exit => "Exit",
            TraceEventType::Associate => "Associate",
            TraceEventType::Info => "Info",
            TraceEventType::Error => "Error",
            TraceEventType::UriBaseAddress => "UriBaseAddress",
            TraceEventType::ClientSendCompleted => "ClientSendCompleted",
            TraceEventType::HandlerMessage => "HandlerMessage",
        }
    }
}

impl fmt::Display for TraceEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified, sequenced diagnostic event. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceEvent {
    pub sequence_id: u64,
    #[serde(rename = "type")]
    pub event_type: TraceEventType,
    /// Originating client instance, e.g. `HttpClient#123456`.
    pub reference: Option<String>,
    pub request_id: RequestId,
    pub method_name: String,
    pub message: String,
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}",
            self.sequence_id,
            self.event_type,
            self.reference.as_deref().unwrap_or(""),
            self.request_id,
            self.method_name,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping() {
        for t in [
            TraceEventType::Unknown,
            TraceEventType::Enter,
            TraceEventType::Exit,
            TraceEventType::Associate,
            TraceEventType::Info,
            TraceEventType::Error,
            TraceEventType::UriBaseAddress,
            TraceEventType::ClientSendCompleted,
            TraceEventType::HandlerMessage,
        ] {
            assert_eq!(TraceEventType::from_code(t.code()), Some(t));
        }
        assert_eq!(TraceEventType::from_code(6), None);
    }

    #[test]
    fn test_display() {
        let event = TraceEvent {
            sequence_id: 3,
            event_type: TraceEventType::Error,
            reference: Some("HttpClient#77".to_string()),
            request_id: 0,
            method_name: "HandleFinishSendAsyncError".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            event.to_string(),
            "3, Error, HttpClient#77, 0, HandleFinishSendAsyncError, connection refused"
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let event = TraceEvent {
            sequence_id: 1,
            event_type: TraceEventType::HandlerMessage,
            reference: None,
            request_id: 7,
            method_name: "SendAsyncCore".to_string(),
            message: "x".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["sequenceId"], 1);
        assert_eq!(json["type"], "HandlerMessage");
        assert_eq!(json["requestId"], 7);
        assert_eq!(json["methodName"], "SendAsyncCore");
    }
}
