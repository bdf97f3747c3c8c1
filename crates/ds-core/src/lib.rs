//! Core types for the dsfront runtime
//!
//! This crate provides the interface to the emulated machine (the [`Core`]
//! trait and its loader), the shared frame and sample types, error handling,
//! configuration, and logging infrastructure.

pub mod config;
pub mod error;
pub mod frame;
pub mod logging;
pub mod machine;
pub mod sample;
pub mod token;

pub use config::{Config, LogLevel};
pub use error::{AudioError, BootError, ConfigError, FrontendError, Result, SaveError};
pub use frame::FrameBuffer;
pub use machine::{CartridgeSlot, Core, CoreLoader, DsKey, RomSet};
pub use sample::{SampleBatch, StereoSample};
pub use token::RunToken;
