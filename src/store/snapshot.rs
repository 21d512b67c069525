//! Serializable views handed to the push layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::RequestId;

use super::request_state::RequestState;

/// Stored and derived fields of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    pub request_id: RequestId,
    pub method: String,
    pub url: String,
    pub request_headers: Vec<(String, String)>,
    pub start_time: DateTime<Utc>,
    pub status_code: u16,
    pub reason_phrase: Option<String>,
    pub response_headers: Vec<(String, String)>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: String,
    pub name: String,
    pub content_type: Option<String>,
    pub content_length: String,
    pub time: String,
    pub is_complete: bool,
}

impl From<&RequestState> for RequestView {
    fn from(state: &RequestState) -> Self {
        Self {
            request_id: state.request_id(),
            method: state.method().to_string(),
            url: state.url().to_string(),
            request_headers: state.request_headers().to_vec(),
            start_time: state.start_time(),
            status_code: state.status_code(),
            reason_phrase: state.reason_phrase().map(|s| s.to_string()),
            response_headers: state.response_headers().to_vec(),
            end_time: state.end_time(),
            status: state.status(),
            name: state.name().to_string(),
            content_type: state.content_type().map(|s| s.to_string()),
            content_length: state.content_length(),
            time: state.time(),
            is_complete: state.is_complete(),
        }
    }
}

/// Requests in creation order plus the error log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub requests: Vec<RequestView>,
    pub errors: Vec<String>,
}

impl StoreSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_serializes_derived_fields() {
        let state = RequestState::new(
            7,
            "GET",
            "http://localhost:5000/favicon.ico",
            vec![("Host".to_string(), "localhost:5000".to_string())],
        );
        let snapshot = StoreSnapshot {
            requests: vec![RequestView::from(&state)],
            errors: vec!["connection refused".to_string()],
        };
        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        let request = &json["requests"][0];
        assert_eq!(request["requestId"], 7);
        assert_eq!(request["status"], "(pending)");
        assert_eq!(request["name"], "favicon.ico");
        assert_eq!(request["isComplete"], false);
        assert_eq!(request["requestHeaders"][0][0], "Host");
        assert_eq!(json["errors"][0], "connection refused");
    }
}
