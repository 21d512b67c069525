//! Main ingestion path.
//!
//! Coordinates the processing of one raw diagnostic event:
//! 1. Listener gate (started, payload present)
//! 2. Classification against the dispatch table and deny-list
//! 3. Sequencing of accepted events
//! 4. Hand-off to trace sinks
//! 5. Request lifecycle store update

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::classification::{Classification, DenyList, EventClassifier};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::{RawEvent, TraceEvent};
use crate::logging::structured::LogContext;
use crate::store::RequestStore;

use super::context::EngineContext;
use super::sequencer::Sequencer;
use super::sink::TraceSink;

/// What happened to one raw event.
#[derive(Debug, Clone, PartialEq)]
pub enum Ingestion {
    /// Engine stopped, or the event had no payload.
    Dropped,
    Skipped,
    Ignored,
    /// `applied` is false when the store had no use for the event.
    Accepted { event: TraceEvent, applied: bool },
}

/// Running totals per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub accepted: u64,
    pub ignored: u64,
    pub skipped: u64,
    pub dropped: u64,
    pub rejected: u64,
}

#[derive(Debug, Default)]
struct Counters {
    accepted: AtomicU64,
    ignored: AtomicU64,
    skipped: AtomicU64,
    dropped: AtomicU64,
    rejected: AtomicU64,
}

pub struct TraceEngine {
    context: EngineContext,
    ctx: LogContext,
    config: EngineConfig,
    classifier: EventClassifier,
    sequencer: Arc<Sequencer>,
    store: Arc<RequestStore>,
    sinks: Vec<Box<dyn TraceSink>>,
    started: AtomicBool,
    counters: Counters,
}

impl TraceEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_sequencer(config, Arc::new(Sequencer::new()))
    }

    /// Build an engine that draws sequence ids from a shared sequencer.
    pub fn with_sequencer(config: EngineConfig, sequencer: Arc<Sequencer>) -> Self {
        let context = EngineContext::new();
        let ctx = context.log_context();
        let classifier = EventClassifier::new(DenyList::new(config.ignored_methods.iter().cloned()));
        let store = Arc::new(RequestStore::new(
            &config.send_method,
            config.error_methods.iter().cloned(),
            ctx.clone(),
        ));

        log::info!(
            "{} ENGINE_CREATED created_at={} source={} send_method={} ignored_methods={}",
            ctx,
            context.created_at.to_rfc3339(),
            config.source_name,
            config.send_method,
            classifier.deny_list().len()
        );

        Self {
            context,
            ctx,
            config,
            classifier,
            sequencer,
            store,
            sinks: Vec::new(),
            started: AtomicBool::new(false),
            counters: Counters::default(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn engine_id(&self) -> &str {
        &self.context.engine_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.context.created_at
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn log_context(&self) -> &LogContext {
        &self.ctx
    }

    pub fn store(&self) -> &Arc<RequestStore> {
        &self.store
    }

    pub fn sequencer(&self) -> &Arc<Sequencer> {
        &self.sequencer
    }

    /// Whether events from the named source should be enabled.
    pub fn accepts_source(&self, source_name: &str) -> bool {
        source_name == self.config.source_name
    }

    pub fn start(&self) {
        self.started.store(true, Ordering::SeqCst);
        log::info!("{} ENGINE_STARTED", self.ctx);
    }

    pub fn stop(&self) {
        self.started.store(false, Ordering::SeqCst);
        log::info!("{} ENGINE_STOPPED", self.ctx);
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Trace events produced so far.
    pub fn event_count(&self) -> u64 {
        self.sequencer.current()
    }

    pub fn stats(&self) -> EngineStats {
        EngineStats {
            accepted: self.counters.accepted.load(Ordering::Relaxed),
            ignored: self.counters.ignored.load(Ordering::Relaxed),
            skipped: self.counters.skipped.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            rejected: self.counters.rejected.load(Ordering::Relaxed),
        }
    }

    /// Process one raw event, surfacing malformed input and protocol
    /// violations to the caller.
    pub fn process(&self, raw: &RawEvent) -> Result<Ingestion> {
        if !self.is_started() || raw.payload.is_none() {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            return Ok(Ingestion::Dropped);
        }

        let classified = self.classifier.classify(raw, &self.sequencer, &self.ctx);
        let event = match classified {
            Ok(Classification::Accepted(event)) => event,
            Ok(Classification::Ignored) => {
                self.counters.ignored.fetch_add(1, Ordering::Relaxed);
                return Ok(Ingestion::Ignored);
            }
            Ok(Classification::Skipped) => {
                self.counters.skipped.fetch_add(1, Ordering::Relaxed);
                return Ok(Ingestion::Skipped);
            }
            Err(e) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                return Err(e);
            }
        };

        for sink in &self.sinks {
            sink.push_trace(&event);
        }

        match self.store.ingest(&event) {
            Ok(applied) => {
                self.counters.accepted.fetch_add(1, Ordering::Relaxed);
                Ok(Ingestion::Accepted { event, applied })
            }
            Err(e) => {
                self.counters.rejected.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Process one raw event, logging and absorbing any error so the
    /// stream keeps flowing. Returns the accepted trace event, if any.
    pub fn on_event(&self, raw: &RawEvent) -> Option<TraceEvent> {
        match self.process(raw) {
            Ok(Ingestion::Accepted { event, .. }) => Some(event),
            Ok(_) => None,
            Err(e) => {
                crate::log_error!(
                    self.ctx,
                    "EVENT_REJECTED",
                    kind = e.kind().as_str(),
                    event_id = raw.event_id,
                    event_name = raw.event_name,
                    payload_len = raw.payload_len(),
                    error = e.to_string(),
                );
                None
            }
        }
    }
}
