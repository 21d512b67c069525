//! Error types for classification and request lifecycle tracking.
//!
//! Two families exist: malformed input (the event or its message text does
//! not follow the producer contract) and protocol violations (the event
//! stream breaks send/receive ordering). Both are raised for the single
//! offending event; callers are expected to log and continue.

use thiserror::Error;

use crate::events::RequestId;

/// Broad category of a [`TraceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedInput,
    ProtocolViolation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::ProtocolViolation => "protocol_violation",
        }
    }
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("unexpected payload length for {event_name} ({event_id}): expected {expected}, got {actual}")]
    PayloadArity {
        event_id: i64,
        event_name: String,
        expected: usize,
        actual: usize,
    },

    #[error("field {index} of {event_name} ({event_id}) is not {expected}: {found}")]
    FieldType {
        event_id: i64,
        event_name: String,
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("unexpected header format: {raw:?}")]
    HeaderFormat { raw: String },

    #[error("unrecognized {method_name} message shape for request {request_id}: {message:?}")]
    UnrecognizedMessage {
        request_id: RequestId,
        method_name: String,
        message: String,
    },

    #[error("invalid status code {raw:?} for request {request_id}")]
    InvalidStatusCode { request_id: RequestId, raw: String },

    #[error("duplicate send for request id {request_id}")]
    DuplicateSend { request_id: RequestId },

    #[error("completion for unknown request id {request_id}")]
    UnknownRequest { request_id: RequestId },

    #[error("duplicate completion for request id {request_id}")]
    DuplicateCompletion { request_id: RequestId },
}

impl TraceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TraceError::DuplicateSend { .. }
            | TraceError::UnknownRequest { .. }
            | TraceError::DuplicateCompletion { .. } => {
                ErrorKind::ProtocolViolation
            }
            _ => ErrorKind::MalformedInput,
        }
    }
}

/// Engine configuration could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

pub type Result<T> = std::result::Result<T, TraceError>;
