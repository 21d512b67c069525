//! Pipeline orchestration module.
//!
//! Wires raw diagnostic events through:
//! - Classification
//! - Sequencing
//! - Trace sinks
//! - The request lifecycle store

pub mod context;
pub mod ingestion;
pub mod sequencer;
pub mod sink;

pub use context::*;
pub use ingestion::*;
pub use sequencer::*;
pub use sink::*;
