//! Reconstructed state of one outbound HTTP request.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::events::RequestId;

use super::headers::{find_header, Headers};
use super::humanize::{humanize_bytes, humanize_duration};

pub const PENDING_STATUS: &str = "(pending)";

/// One request, from "request sent" to "response received".
///
/// Values are immutable; completing a request produces a new value via
/// [`RequestState::completed`], which the store swaps in under its lock.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestState {
    request_id: RequestId,
    method: String,
    url: String,
    request_headers: Headers,
    start_time: DateTime<Utc>,
    status_code: u16,
    reason_phrase: Option<String>,
    response_headers: Headers,
    end_time: Option<DateTime<Utc>>,
}

impl RequestState {
    pub fn new(request_id: RequestId, method: &str, url: &str, request_headers: Headers) -> Self {
        Self::started_at(request_id, method, url, request_headers, Utc::now())
    }

    pub fn started_at(
        request_id: RequestId,
        method: &str,
        url: &str,
        request_headers: Headers,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id,
            method: method.to_string(),
            url: url.to_string(),
            request_headers,
            start_time,
            status_code: 0,
            reason_phrase: None,
            response_headers: Vec::new(),
            end_time: None,
        }
    }

    /// Copy of this state marked complete at `end_time`.
    pub fn completed(
        &self,
        status_code: u16,
        reason_phrase: &str,
        response_headers: Headers,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            status_code,
            reason_phrase: Some(reason_phrase.to_string()),
            response_headers,
            end_time: Some(end_time),
            ..self.clone()
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_headers(&self) -> &[(String, String)] {
        &self.request_headers
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// 0 until the response arrives.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason_phrase(&self) -> Option<&str> {
        self.reason_phrase.as_deref()
    }

    pub fn response_headers(&self) -> &[(String, String)] {
        &self.response_headers
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn is_complete(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn status(&self) -> String {
        if self.status_code > 0 {
            self.status_code.to_string()
        } else {
            PENDING_STATUS.to_string()
        }
    }

    /// Last path segment of the URL.
    pub fn name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or_default()
    }

    pub fn content_type(&self) -> Option<&str> {
        find_header(&self.response_headers, "Content-Type")
    }

    /// Empty when the header is missing or not a byte count.
    pub fn content_length(&self) -> String {
        find_header(&self.response_headers, "Content-Length")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(humanize_bytes)
            .unwrap_or_default()
    }

    /// Empty while pending.
    pub fn time(&self) -> String {
        self.end_time
            .map(|end| humanize_duration(end - self.start_time))
            .unwrap_or_default()
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.request_id, self.url, self.status_code)
    }
}
