//! Liveness signalling towards the host scheduler.
//!
//! The compositor emits one heartbeat per accepted tile so that a host
//! watching a long tile stream can tell the task is still making progress.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receives a heartbeat on every accepted tile. No payload.
pub trait Progress {
    fn progress(&self);
}

impl<F: Fn()> Progress for F {
    fn progress(&self) {
        self()
    }
}

/// Discards heartbeats.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn progress(&self) {}
}

/// Counts heartbeats. Safe to share between threads.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    ticks: AtomicU64,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

impl Progress for ProgressCounter {
    fn progress(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_closure_progress() {
        let beats = Cell::new(0);
        let progress = || beats.set(beats.get() + 1);
        progress.progress();
        progress.progress();
        assert_eq!(beats.get(), 2);
    }

    #[test]
    fn test_counter() {
        let counter = ProgressCounter::new();
        counter.progress();
        assert_eq!(counter.count(), 1);
    }
}
