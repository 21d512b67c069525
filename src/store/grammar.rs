//! SendAsyncCore message grammar.
//!
//! The HTTP handler logs one line when a request leaves and one when its
//! response headers arrive:
//!
//! ```text
//! Sending request: Method: GET, RequestUri: 'http://host/path', Version: 1.1, Content: (null), Headers: { Host: host }
//! Received response: StatusCode: 200, ReasonPhrase: 'OK', Version: 1.1, Content: System.Net.Http.HttpConnectionResponseContent, Headers: { Content-Length: 12 }
//! ```
//!
//! The header block may span several lines.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Result, TraceError};
use crate::events::RequestId;

use super::headers::{parse_headers, Headers};

lazy_static! {
    static ref SENDING: Regex = Regex::new(
        r"(?s)^Sending request: Method: (?P<method>\w+), RequestUri: '(?P<url>.+?)', Version: (?P<version>\d+\.\d+), Content: (?P<content>\S+?), Headers:\s*\{(?P<headers>[^}]*)\}\s*$"
    )
    .unwrap();

    static ref RECEIVED: Regex = Regex::new(
        r"(?s)^Received response: StatusCode: (?P<status>\d+), ReasonPhrase: '(?P<reason>[^']*)', Version: (?P<version>\d+\.\d+), Content: (?P<content>\S+?), Headers:\s*\{(?P<headers>[^}]*)\}\s*$"
    )
    .unwrap();
}

/// A parsed `Sending request:` line.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: String,
    pub url: String,
    pub version: String,
    pub headers: Headers,
}

/// A parsed `Received response:` line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedResponse {
    pub status_code: u16,
    pub reason_phrase: String,
    pub version: String,
    pub headers: Headers,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SendAsyncMessage {
    Sent(SentRequest),
    Received(ReceivedResponse),
}

/// Parse a SendAsyncCore message. Exactly one of the two shapes must match.
pub fn parse_send_async_message(
    request_id: RequestId,
    method_name: &str,
    message: &str,
) -> Result<SendAsyncMessage> {
    if let Some(caps) = SENDING.captures(message) {
        return Ok(SendAsyncMessage::Sent(SentRequest {
            method: caps["method"].to_string(),
            url: caps["url"].to_string(),
            version: caps["version"].to_string(),
            headers: parse_headers(&caps["headers"])?,
        }));
    }

    if let Some(caps) = RECEIVED.captures(message) {
        let raw_status = &caps["status"];
        let status_code = raw_status
            .parse::<u16>()
            .map_err(|_| TraceError::InvalidStatusCode {
                request_id,
                raw: raw_status.to_string(),
            })?;
        return Ok(SendAsyncMessage::Received(ReceivedResponse {
            status_code,
            reason_phrase: caps["reason"].to_string(),
            version: caps["version"].to_string(),
            headers: parse_headers(&caps["headers"])?,
        }));
    }

    Err(TraceError::UnrecognizedMessage {
        request_id,
        method_name: method_name.to_string(),
        message: message.to_string(),
    })
}
