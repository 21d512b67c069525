//! Event type dispatch table.
//!
//! Each recognized event type code has a fixed payload arity and a fixed
//! rule mapping positional fields onto trace event fields.

use serde_json::Value;

use crate::error::{Result, TraceError};
use crate::events::{RawEvent, RequestId, TraceEventType};

/// Fields pulled out of a raw payload, before sequencing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFields {
    pub reference: Option<String>,
    pub request_id: RequestId,
    pub method_name: String,
    pub message: String,
}

type Extractor = fn(&RawEvent, &[Value]) -> Result<ExtractedFields>;

/// One row of the dispatch table.
#[derive(Clone, Copy)]
pub struct EventSchema {
    pub event_type: TraceEventType,
    pub arity: usize,
    pub extract: Extractor,
}

impl std::fmt::Debug for EventSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSchema")
            .field("event_type", &self.event_type)
            .field("arity", &self.arity)
            .finish()
    }
}

pub const HANDLER_MESSAGE_SCHEMA: EventSchema = EventSchema {
    event_type: TraceEventType::HandlerMessage,
    arity: 5,
    extract: extract_handler_message,
};

pub const ERROR_SCHEMA: EventSchema = EventSchema {
    event_type: TraceEventType::Error,
    arity: 3,
    extract: extract_error,
};

const SCHEMAS: &[EventSchema] = &[HANDLER_MESSAGE_SCHEMA, ERROR_SCHEMA];

/// Look up the schema for a raw event type code.
pub fn schema_for(event_id: i64) -> Option<&'static EventSchema> {
    SCHEMAS.iter().find(|s| s.event_type.code() == event_id)
}

impl EventSchema {
    /// Check arity, then run the extraction rule.
    pub fn read(&self, raw: &RawEvent, payload: &[Value]) -> Result<ExtractedFields> {
        if payload.len() != self.arity {
            return Err(TraceError::PayloadArity {
                event_id: raw.event_id,
                event_name: raw.event_name.clone(),
                expected: self.arity,
                actual: payload.len(),
            });
        }
        (self.extract)(raw, payload)
    }
}

// Handler message: [this, connection, request id, member name, message].
fn extract_handler_message(raw: &RawEvent, payload: &[Value]) -> Result<ExtractedFields> {
    Ok(ExtractedFields {
        reference: None,
        request_id: int_field(raw, payload, 2)?,
        method_name: string_field(raw, payload, 3)?,
        message: string_field(raw, payload, 4)?,
    })
}

// Error: [this or context, member name, message].
fn extract_error(raw: &RawEvent, payload: &[Value]) -> Result<ExtractedFields> {
    Ok(ExtractedFields {
        reference: Some(string_field(raw, payload, 0)?),
        request_id: 0,
        method_name: string_field(raw, payload, 1)?,
        message: string_field(raw, payload, 2)?,
    })
}

fn string_field(raw: &RawEvent, payload: &[Value], index: usize) -> Result<String> {
    match &payload[index] {
        Value::String(s) => Ok(s.clone()),
        other => Err(field_type_error(raw, index, "a string", other)),
    }
}

/// Null request ids mean "not applicable" and read as 0.
fn int_field(raw: &RawEvent, payload: &[Value], index: usize) -> Result<RequestId> {
    match &payload[index] {
        Value::Null => Ok(0),
        value => value
            .as_i64()
            .ok_or_else(|| field_type_error(raw, index, "an integer", value)),
    }
}

fn field_type_error(raw: &RawEvent, index: usize, expected: &'static str, found: &Value) -> TraceError {
    TraceError::FieldType {
        event_id: raw.event_id,
        event_name: raw.event_name.clone(),
        index,
        expected,
        found: found.to_string(),
    }
}
