//! Process-wide click counter.

use std::sync::atomic::{AtomicU64, Ordering};

/// A single counter shared by every client, starting at zero on each process start.
#[derive(Debug, Default)]
pub struct CounterService {
    count: AtomicU64,
}

impl CounterService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value, without side effects.
    pub fn get_count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    /// Add one and return the new value.
    ///
    /// The read-modify-write is a single atomic step, so concurrent
    /// increments are never lost.
    pub fn increment(&self) -> u64 {
        let next = self.count.fetch_add(1, Ordering::SeqCst).wrapping_add(1);
        tracing::debug!(count = next, "Counter incremented");
        next
    }
}
