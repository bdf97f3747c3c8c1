//! Runtime for the dsfront frontend
//!
//! Boots a core, runs it on three workers (execution, audio, save) and
//! guarantees every worker has terminated before the core is released or
//! replaced.

pub mod demo;
pub mod driver;
pub mod runtime;

pub use demo::{DemoCore, DemoLoader};
pub use driver::{DriverSettings, ExecutionDriver};
pub use runtime::Runtime;
