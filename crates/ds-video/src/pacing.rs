//! Frame pacing governor
//!
//! Host render ticks often arrive faster than the core produces frames
//! (high refresh displays). Polling on every tick would repoll the core
//! needlessly, so the pacer measures the tick rate once per second and only
//! polls every `swap_interval` ticks, anchored to a 60 Hz core.

use ds_core::{Core, FrameBuffer};
use std::time::{Duration, Instant};

/// Core frame rate the swap interval is derived against
const BASE_FRAME_RATE: u32 = 60;

/// Margin added to the measured tick count to absorb jitter
const MEASUREMENT_MARGIN: u32 = 5;

const MEASUREMENT_PERIOD: Duration = Duration::from_secs(1);

/// What the presentation layer is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentState {
    /// Frames from a running core
    #[default]
    Active,
    /// A single cleared frame, shown after the core stopped
    Cleared,
}

/// Result of one render tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A new frame was copied into the buffer
    NewFrame,
    /// No new frame; present the existing buffer again
    Repeat,
    /// The core went away; the buffer was cleared and should be presented once
    Cleared,
    /// Nothing to present
    Suppressed,
}

impl TickOutcome {
    /// Whether the host should redraw this tick
    pub fn should_present(self) -> bool {
        !matches!(self, Self::Suppressed)
    }
}

/// Per-tick frame poll throttling
#[derive(Debug, Clone)]
pub struct FramePacer {
    tick_count: u32,
    swap_interval: u32,
    ticks_this_second: u32,
    last_measurement: Instant,
    state: PresentState,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a pacer whose first measurement window opens at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            tick_count: 0,
            swap_interval: 1,
            ticks_this_second: 0,
            last_measurement: now,
            state: PresentState::Active,
        }
    }

    /// Ticks between frame polls, never below 1
    pub fn swap_interval(&self) -> u32 {
        self.swap_interval
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    pub fn state(&self) -> PresentState {
        self.state
    }

    /// Run one render tick now
    pub fn tick<C: Core + ?Sized>(
        &mut self,
        source: Option<&C>,
        buffer: &mut FrameBuffer,
        crop: bool,
    ) -> TickOutcome {
        self.tick_at(Instant::now(), source, buffer, crop)
    }

    /// Run one render tick at a given instant.
    ///
    /// `source` is `None` while no core is running.
    pub fn tick_at<C: Core + ?Sized>(
        &mut self,
        now: Instant,
        source: Option<&C>,
        buffer: &mut FrameBuffer,
        crop: bool,
    ) -> TickOutcome {
        let Some(core) = source else {
            return match self.state {
                PresentState::Active => {
                    buffer.clear();
                    self.state = PresentState::Cleared;
                    tracing::debug!("Core stopped, presenting a cleared frame");
                    TickOutcome::Cleared
                }
                PresentState::Cleared => TickOutcome::Suppressed,
            };
        };

        if self.state == PresentState::Cleared {
            // Ticks counted while idle would skew the first measurement
            self.state = PresentState::Active;
            self.tick_count = 0;
            self.ticks_this_second = 0;
            self.last_measurement = now;
        }

        self.tick_count += 1;
        let mut outcome = TickOutcome::Repeat;
        if self.tick_count >= self.swap_interval && core.poll_frame(buffer, crop) {
            self.tick_count = 0;
            outcome = TickOutcome::NewFrame;
        }

        self.ticks_this_second += 1;
        if now.saturating_duration_since(self.last_measurement) >= MEASUREMENT_PERIOD {
            self.swap_interval = Self::interval_for(self.ticks_this_second);
            tracing::trace!(
                ticks = self.ticks_this_second,
                swap_interval = self.swap_interval,
                "Measured render tick rate"
            );
            self.ticks_this_second = 0;
            self.last_measurement = now;
        }

        outcome
    }

    /// Swap interval for a measured number of ticks per second
    pub fn interval_for(ticks_per_second: u32) -> u32 {
        ((ticks_per_second + MEASUREMENT_MARGIN) / BASE_FRAME_RATE).max(1)
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}
