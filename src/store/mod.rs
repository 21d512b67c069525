//! Request lifecycle store module.
//!
//! Reconstructs per-request state from SendAsyncCore handler messages:
//! - Message grammar and header list parsing
//! - Request state with derived display fields
//! - The lock-guarded store and its snapshot views

pub mod grammar;
pub mod headers;
pub mod humanize;
pub mod request_state;
pub mod request_store;
pub mod snapshot;

pub use grammar::*;
pub use headers::*;
pub use humanize::*;
pub use request_state::*;
pub use request_store::*;
pub use snapshot::*;
