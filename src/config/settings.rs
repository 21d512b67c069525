//! Engine settings.
//!
//! Every field has a default matching the HTTP client's diagnostic source,
//! so an empty JSON object is a valid configuration.

use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::HTTP_EVENT_SOURCE;

/// Handler methods that only do connection or buffer bookkeeping.
pub const DEFAULT_IGNORED_METHODS: &[&str] = &[
    ".ctor",
    "IncrementConnectionCountNoLock",
    "DecrementConnectionCount",
    "GetHttpConnectionAsync",
    "TraceConnection",
    "ReturnConnection",
    "WriteToStreamAsync",
    "FillAsync",
    "ReadBufferedAsyncCore",
    "CopyFromBufferAsync",
    "CleanCacheAndDisposeIfUnused",
    "IsUsable",
    "Dispose",
];

pub const DEFAULT_SEND_METHOD: &str = "SendAsyncCore";
pub const DEFAULT_ERROR_METHOD: &str = "HandleFinishSendAsyncError";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Event source whose events are consumed.
    pub source_name: String,
    /// Handler method whose messages carry request/response lines.
    pub send_method: String,
    /// Methods whose messages are recorded in the error log.
    pub error_methods: Vec<String>,
    /// Handler methods dropped during classification.
    pub ignored_methods: Vec<String>,
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            source_name: HTTP_EVENT_SOURCE.to_string(),
            send_method: DEFAULT_SEND_METHOD.to_string(),
            error_methods: vec![DEFAULT_ERROR_METHOD.to_string()],
            ignored_methods: DEFAULT_IGNORED_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            log_level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.level_filter()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading engine config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing engine config {}", path.display()))
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
