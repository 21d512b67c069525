//! Process-wide trace event sequence numbers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Strictly increasing sequence ids, starting at 1.
///
/// Each engine owns its own sequencer; share it with `Arc` when several
/// producers stamp events for the same engine.
#[derive(Debug, Default)]
pub struct Sequencer {
    counter: AtomicU64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Number of ids handed out so far.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }
}
