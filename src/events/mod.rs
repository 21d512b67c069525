//! Event model.
//!
//! Raw diagnostic events as delivered by the instrumented HTTP client, and
//! the typed trace events the classifier produces from them.

pub mod raw;
pub mod trace_event;

pub use raw::*;
pub use trace_event::*;
