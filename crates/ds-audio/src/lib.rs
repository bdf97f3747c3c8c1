//! Audio output for the dsfront runtime
//!
//! The core produces samples at its native rate (32768 Hz on real hardware)
//! while host devices want their own rate and buffer size. The audio worker
//! requests one native batch per host buffer, stretches it with a
//! nearest-neighbour mapping, and hands it to an [`AudioSink`].

pub mod backend;
pub mod resampler;
pub mod thread;

pub use backend::{AudioSink, NullAudioSink};
#[cfg(feature = "cpal")]
pub use backend::CpalAudioSink;
pub use resampler::{native_batch_len, NearestResampler};
pub use thread::AudioWorker;
