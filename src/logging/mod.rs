//! Structured logging with engine context.
//!
//! Provides logging macros and utilities that include the engine id and,
//! where known, the request id in every log message for easy correlation.

pub mod structured;

pub use structured::*;
