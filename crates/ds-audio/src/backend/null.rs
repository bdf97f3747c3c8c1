//! Null audio sink
//!
//! Discards audio but keeps the worker paced at the host buffer period, so
//! the core's sample queue drains at the same rate a real device would.

use super::AudioSink;
use ds_core::AudioError;
use std::time::Duration;

/// Sink that drops everything it is given
#[derive(Debug, Clone)]
pub struct NullAudioSink {
    sample_rate: u32,
    buffer_frames: usize,
    paced: bool,
    submitted: u64,
}

impl NullAudioSink {
    /// Create a sink that sleeps one buffer period per submission
    pub fn new(sample_rate: u32, buffer_frames: usize) -> Self {
        Self {
            sample_rate,
            buffer_frames,
            paced: true,
            submitted: 0,
        }
    }

    /// Create a sink that returns immediately
    pub fn unpaced(sample_rate: u32, buffer_frames: usize) -> Self {
        Self {
            paced: false,
            ..Self::new(sample_rate, buffer_frames)
        }
    }

    /// Time one buffer takes to play
    pub fn period(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.buffer_frames as f64 / f64::from(self.sample_rate))
    }

    /// Buffers accepted so far
    pub fn submitted(&self) -> u64 {
        self.submitted
    }
}

impl AudioSink for NullAudioSink {
    fn submit(&mut self, frames: &[i16]) -> Result<(), AudioError> {
        if frames.len() < self.buffer_frames * 2 {
            return Err(AudioError::Stream(format!(
                "short buffer: {} samples, expected {}",
                frames.len(),
                self.buffer_frames * 2
            )));
        }

        if self.paced {
            std::thread::sleep(self.period());
        }
        self.submitted += 1;
        Ok(())
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn buffer_frames(&self) -> usize {
        self.buffer_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        let sink = NullAudioSink::new(48000, 1024);
        assert_eq!(sink.period().as_micros(), 21333);
    }

    #[test]
    fn test_submit() {
        let mut sink = NullAudioSink::unpaced(48000, 4);
        assert!(sink.submit(&[0; 8]).is_ok());
        assert!(matches!(sink.submit(&[0; 6]), Err(AudioError::Stream(_))));
        assert_eq!(sink.submitted(), 1);
    }
}
