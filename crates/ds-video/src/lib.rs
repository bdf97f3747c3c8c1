//! Display pacing for the dsfront runtime
//!
//! The core produces frames at its own cadence, which rarely matches the
//! host's render tick rate. This crate decides on each tick whether a new
//! frame is worth polling for and tracks what the presentation layer shows.

pub mod pacing;
pub mod presenter;

pub use pacing::{FramePacer, PresentState, TickOutcome};
pub use presenter::Presenter;
