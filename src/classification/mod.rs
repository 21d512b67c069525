//! Event classification module.
//!
//! Decides which raw diagnostic events become trace events:
//! - Dispatch table keyed by event type code (arity + field extraction)
//! - Deny-list of bookkeeping handler methods

pub mod classifier;
pub mod deny_list;
pub mod dispatch;

pub use classifier::*;
pub use deny_list::*;
pub use dispatch::*;
