//! Save data for the dsfront runtime
//!
//! Cartridge saves live in memory while the core runs. The flusher worker
//! writes them back to disk periodically and once more on shutdown.

pub mod flusher;
pub mod save_file;
pub mod save_type;

pub use flusher::{SaveFlusher, WakeSignal, DEFAULT_FLUSH_INTERVAL};
pub use save_file::SaveFile;
pub use save_type::{GbaSaveType, NdsSaveType};
