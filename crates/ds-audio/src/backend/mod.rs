//! Audio output sinks

#[cfg(feature = "cpal")]
pub mod cpal_backend;
pub mod null;

#[cfg(feature = "cpal")]
pub use cpal_backend::CpalAudioSink;
pub use null::NullAudioSink;

use ds_core::AudioError;
use std::sync::Arc;

/// Destination for host-rate interleaved stereo audio.
///
/// `submit` may block until the device has room; that wait is the only
/// back-pressure the audio worker sees.
pub trait AudioSink {
    /// Queue one host buffer of interleaved stereo frames
    fn submit(&mut self, frames: &[i16]) -> Result<(), AudioError>;

    /// Host sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Stereo frames per submitted buffer
    fn buffer_frames(&self) -> usize;
}

/// Opens a sink on the audio worker's own thread.
///
/// Some platforms' streams cannot move between threads, so the worker opens
/// its sink after it has started rather than receiving one.
pub type SinkFactory = Arc<dyn Fn() -> Result<Box<dyn AudioSink>, AudioError> + Send + Sync>;

/// Factory for a paced null sink
pub fn null_sink_factory(sample_rate: u32, buffer_frames: usize) -> SinkFactory {
    Arc::new(move || Ok(Box::new(NullAudioSink::new(sample_rate, buffer_frames)) as Box<dyn AudioSink>))
}
