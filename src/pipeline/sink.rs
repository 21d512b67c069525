//! Output seam toward the push layer.

use crate::events::TraceEvent;
use crate::logging::structured::LogContext;

/// Receives every accepted trace event, before it reaches the store.
///
/// Implementations forward events to remote subscribers; they must not
/// block for long since they run on the ingestion path.
pub trait TraceSink: Send + Sync {
    fn push_trace(&self, event: &TraceEvent);
}

/// Writes each trace event to the log at info level.
#[derive(Debug, Clone)]
pub struct LogSink {
    ctx: LogContext,
}

impl LogSink {
    pub fn new(ctx: LogContext) -> Self {
        Self { ctx }
    }
}

impl TraceSink for LogSink {
    fn push_trace(&self, event: &TraceEvent) {
        crate::log_info!(
            self.ctx.with_request(event.request_id),
            "TRACE_EVENT",
            sequence_id = event.sequence_id,
            event_type = event.event_type.as_str(),
            method = event.method_name,
            message = event.message,
        );
    }
}
