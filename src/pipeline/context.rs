//! Engine context management.
//!
//! Provides the engine identity used in every log line.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Identity of one running engine.
#[derive(Debug, Clone)]
pub struct EngineContext {
    pub engine_id: String,
    pub created_at: DateTime<Utc>,
}

impl EngineContext {
    pub fn new() -> Self {
        let engine_id = format!("engine-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            engine_id,
            created_at: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.engine_id)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
