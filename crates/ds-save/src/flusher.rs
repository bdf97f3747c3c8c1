//! Background save flushing

use ds_core::{Core, RunToken};
use parking_lot::{Condvar, Mutex};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Time between periodic flushes
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct SignalState {
    raised: Mutex<bool>,
    cond: Condvar,
}

/// Wakes a worker blocked in a timed wait.
///
/// A raise that happens before the wait starts is not lost: the next wait
/// returns immediately and consumes it.
#[derive(Debug, Clone, Default)]
pub struct WakeSignal {
    state: Arc<SignalState>,
}

impl WakeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        let mut raised = self.state.raised.lock();
        *raised = true;
        self.state.cond.notify_all();
    }

    /// Block until raised or until `timeout` passes. Returns whether the
    /// signal was raised.
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let mut raised = self.state.raised.lock();
        self.state
            .cond
            .wait_while_for(&mut raised, |raised| !*raised, timeout);
        std::mem::take(&mut *raised)
    }
}

/// Periodically writes every active cartridge save back to disk.
///
/// The flusher is the only caller of `Core::flush_save`.
pub struct SaveFlusher<C: Core> {
    core: Arc<C>,
    token: RunToken,
    signal: WakeSignal,
    interval: Duration,
}

impl<C: Core> SaveFlusher<C> {
    pub fn new(core: Arc<C>, token: RunToken, signal: WakeSignal) -> Self {
        Self {
            core,
            token,
            signal,
            interval: DEFAULT_FLUSH_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn spawn(self) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("save".to_string())
            .spawn(move || self.run())
    }

    /// Flush on every wake until the token is cleared, then flush once more
    pub fn run(&self) {
        tracing::info!("Save worker started, flushing every {:?}", self.interval);

        while self.token.is_running() {
            self.signal.wait_for(self.interval);
            if !self.token.is_running() {
                break;
            }
            self.flush_all();
        }

        let written = self.flush_all();
        tracing::info!("Save worker stopped after final flush ({} written)", written);
    }

    /// Flush every active slot. Returns how many slots were written.
    pub fn flush_all(&self) -> usize {
        let mut written = 0;
        for slot in self.core.save_slots() {
            match self.core.flush_save(slot) {
                Ok(true) => {
                    written += 1;
                    tracing::debug!("Flushed {} save", slot);
                }
                Ok(false) => {}
                Err(e) => tracing::warn!("Failed to flush {} save: {}", slot, e),
            }
        }
        written
    }
}
