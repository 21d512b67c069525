//! Structured logging utilities.
//!
//! Provides context-aware logging with engine_id and request_id included
//! in every log message.

use std::fmt;

use log::LevelFilter;

use crate::events::RequestId;

/// Initialize the process logger.
///
/// Safe to call repeatedly; only the first call installs the logger.
pub fn init_logger(level: LevelFilter) {
    let _ = env_logger::builder()
        .filter_level(level)
        .format_timestamp_millis()
        .try_init();
}

/// Logging context for one engine instance.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub engine_id: String,
    pub request_id: Option<RequestId>,
}

impl LogContext {
    pub fn new(engine_id: &str) -> Self {
        Self {
            engine_id: engine_id.to_string(),
            request_id: None,
        }
    }

    pub fn with_request(&self, request_id: RequestId) -> Self {
        Self {
            engine_id: self.engine_id.clone(),
            request_id: Some(request_id),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.request_id {
            Some(rid) => write!(f, "[engine={}] [request={}]", self.engine_id, rid),
            None => write!(f, "[engine={}]", self.engine_id),
        }
    }
}

/// Log an info message with context.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a warning message with context.
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log an error message with context.
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

/// Log a debug message with context.
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}
