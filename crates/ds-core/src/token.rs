//! Cooperative cancellation shared by the runtime's workers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared running flag.
///
/// Every worker loop polls it once per iteration. Clones observe the same
/// flag; clearing it never interrupts an iteration already in progress.
#[derive(Debug, Clone, Default)]
pub struct RunToken {
    running: Arc<AtomicBool>,
}

impl RunToken {
    /// Create a token in the stopped state
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    /// Clear the flag. Returns whether it was set.
    pub fn stop(&self) -> bool {
        self.running.swap(false, Ordering::AcqRel)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}
