//! HttpTrace Core - HTTP request lifecycle reconstruction
//!
//! This crate rebuilds the life-cycle of outbound HTTP requests (sent,
//! in flight, completed) from the low-level diagnostic events an
//! instrumented HTTP client emits, and exposes the result to real-time
//! consumers. The implementation prioritizes:
//!
//! 1. **Correctness** - Every send is matched to exactly one completion
//! 2. **Logging** - Every rejected event logged with full context
//! 3. **Concurrency** - Readers never observe a half-updated request
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `events` - Raw diagnostic events and typed trace events
//! - `classification` - Dispatch table and handler-method deny-list
//! - `pipeline` - Sequencer, sinks and the ingestion engine
//! - `store` - Message grammar, request states and the lifecycle store
//! - `config` - Engine configuration
//! - `logging` - Structured logging with engine context
//! - `error` - Error types
//!
//! With the `python` feature the engine is also exposed to Python via PyO3.
//!
//! ```
//! use httptrace_core::{EngineConfig, RawEvent, TraceEngine};
//! use serde_json::json;
//!
//! let engine = TraceEngine::new(EngineConfig::default());
//! engine.start();
//! engine.on_event(&RawEvent::new(21, "HandlerMessage", vec![
//!     json!(0), json!(0), json!(7), json!("SendAsyncCore"),
//!     json!("Sending request: Method: GET, RequestUri: 'http://localhost:5000/css/app.css', Version: 1.1, Content: (null), Headers: { Host: localhost:5000 }"),
//! ]));
//! assert_eq!(engine.store().get(7).unwrap().status(), "(pending)");
//! ```

pub mod classification;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod pipeline;
pub mod store;

#[cfg(feature = "python")]
mod python;

pub use classification::{Classification, DenyList, EventClassifier};
pub use config::EngineConfig;
pub use error::{ErrorKind, Result, TraceError};
pub use events::{RawEvent, RequestId, TraceEvent, TraceEventType};
pub use pipeline::{Ingestion, LogSink, Sequencer, TraceEngine, TraceSink};
pub use store::{RequestState, RequestStore, RequestView, StoreSnapshot};
