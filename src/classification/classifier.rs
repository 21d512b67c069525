//! Raw event classification.

use crate::error::Result;
use crate::events::{RawEvent, TraceEvent, TraceEventType};
use crate::logging::structured::LogContext;
use crate::pipeline::sequencer::Sequencer;

use super::deny_list::DenyList;
use super::dispatch::schema_for;

/// Outcome of classifying one raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Accepted(TraceEvent),
    /// Recognized event type, but a deny-listed handler method.
    Ignored,
    /// Event type code with no dispatch entry.
    Skipped,
}

impl Classification {
    pub fn as_str(&self) -> &str {
        match self {
            Classification::Accepted(_) => "accepted",
            Classification::Ignored => "ignored",
            Classification::Skipped => "skipped",
        }
    }
}

/// Maps raw events to trace events. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    deny_list: DenyList,
}

impl EventClassifier {
    pub fn new(deny_list: DenyList) -> Self {
        Self { deny_list }
    }

    pub fn deny_list(&self) -> &DenyList {
        &self.deny_list
    }

    /// Classify `raw`, stamping accepted events with the next sequence id.
    ///
    /// Sequence ids are drawn only for accepted events, so ignored and
    /// skipped events leave no gaps.
    pub fn classify(
        &self,
        raw: &RawEvent,
        sequencer: &Sequencer,
        ctx: &LogContext,
    ) -> Result<Classification> {
        let schema = match schema_for(raw.event_id) {
            Some(schema) => schema,
            None => {
                log::debug!(
                    "{} EVENT_SKIPPED name={} id={} payload={}",
                    ctx,
                    raw.event_name,
                    raw.event_id,
                    raw.payload_summary()
                );
                return Ok(Classification::Skipped);
            }
        };

        let payload = raw.payload.as_deref().unwrap_or(&[]);
        let fields = schema.read(raw, payload)?;

        if schema.event_type == TraceEventType::HandlerMessage
            && self.deny_list.is_ignored(&fields.method_name)
        {
            log::trace!("{} EVENT_IGNORED method={}", ctx, fields.method_name);
            return Ok(Classification::Ignored);
        }

        Ok(Classification::Accepted(TraceEvent {
            sequence_id: sequencer.next(),
            event_type: schema.event_type,
            reference: fields.reference,
            request_id: fields.request_id,
            method_name: fields.method_name,
            message: fields.message,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IGNORED_METHODS;
    use crate::error::TraceError;
    use serde_json::json;

    fn classifier() -> EventClassifier {
        EventClassifier::new(DenyList::new(DEFAULT_IGNORED_METHODS.iter().copied()))
    }

    fn ctx() -> LogContext {
        LogContext::new("engine-test")
    }

    fn handler(method: &str, request_id: i64, message: &str) -> RawEvent {
        RawEvent::new(
            21,
            "HandlerMessage",
            vec![json!(11), json!(22), json!(request_id), json!(method), json!(message)],
        )
    }

    #[test]
    fn test_accepts_handler_message() {
        let seq = Sequencer::new();
        let result = classifier()
            .classify(&handler("SendAsyncCore", 7, "hello"), &seq, &ctx())
            .unwrap();
        match result {
            Classification::Accepted(event) => {
                assert_eq!(event.sequence_id, 1);
                assert_eq!(event.event_type, TraceEventType::HandlerMessage);
                assert_eq!(event.request_id, 7);
                assert_eq!(event.message, "hello");
            }
            other => panic!("expected accepted, got {}", other.as_str()),
        }
    }

    #[test]
    fn test_deny_listed_method_is_ignored() {
        let seq = Sequencer::new();
        let result = classifier()
            .classify(&handler("Dispose", 7, ""), &seq, &ctx())
            .unwrap();
        assert_eq!(result, Classification::Ignored);
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn test_deny_list_not_applied_to_errors() {
        let seq = Sequencer::new();
        let raw = RawEvent::new(5, "ErrorMessage", vec![json!("HttpClient#1"), json!("Dispose"), json!("boom")]);
        let result = classifier().classify(&raw, &seq, &ctx()).unwrap();
        assert!(matches!(result, Classification::Accepted(_)));
    }

    #[test]
    fn test_unknown_code_is_skipped() {
        let seq = Sequencer::new();
        let raw = RawEvent::new(1, "Enter", vec![json!("HttpClient#1"), json!(".ctor"), json!("")]);
        let result = classifier().classify(&raw, &seq, &ctx()).unwrap();
        assert_eq!(result, Classification::Skipped);
        assert_eq!(seq.current(), 0);
    }

    #[test]
    fn test_arity_mismatch_is_error() {
        let seq = Sequencer::new();
        let raw = RawEvent::new(5, "ErrorMessage", vec![json!("HttpClient#1"), json!("x")]);
        let err = classifier().classify(&raw, &seq, &ctx()).unwrap_err();
        assert!(matches!(err, TraceError::PayloadArity { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_arity_checked_before_deny_list() {
        let seq = Sequencer::new();
        let raw = RawEvent::new(21, "HandlerMessage", vec![json!(1), json!(2), json!(3), json!("Dispose")]);
        assert!(classifier().classify(&raw, &seq, &ctx()).is_err());
    }

    #[test]
    fn test_sequence_ids_increase() {
        let seq = Sequencer::new();
        let c = classifier();
        let mut last = 0;
        for i in 0..5 {
            if let Classification::Accepted(event) =
                c.classify(&handler("SendAsyncCore", i, "m"), &seq, &ctx()).unwrap()
            {
                assert!(event.sequence_id > last);
                last = event.sequence_id;
            }
        }
        assert_eq!(last, 5);
    }
}
