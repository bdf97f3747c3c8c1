//! cpal audio sink
//!
//! Host audio output through cpal (Cross-Platform Audio Library). Buffers
//! pass to the device callback through a one-slot channel, so `submit`
//! blocks while the device still has a full buffer queued.

use super::AudioSink;
use crossbeam::channel::{self, Receiver, SendTimeoutError, Sender};
use ds_core::AudioError;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use std::time::Duration;

/// Buffers pulled by the device callback
struct Feed {
    receiver: Receiver<Vec<i16>>,
    pending: Vec<i16>,
    position: usize,
}

impl Feed {
    fn next_frame(&mut self) -> Option<[i16; 2]> {
        while self.position + 2 > self.pending.len() {
            self.pending = self.receiver.try_recv().ok()?;
            self.position = 0;
        }
        let frame = [self.pending[self.position], self.pending[self.position + 1]];
        self.position += 2;
        Some(frame)
    }

    fn fill<T: SizedSample + FromSample<i16>>(&mut self, data: &mut [T], channels: usize) {
        for out in data.chunks_mut(channels.max(1)) {
            // Underrun plays silence
            let [left, right] = self.next_frame().unwrap_or([0, 0]);
            if out.len() == 1 {
                let mono = ((i32::from(left) + i32::from(right)) / 2) as i16;
                out[0] = T::from_sample(mono);
                continue;
            }
            for (ch, sample) in out.iter_mut().enumerate() {
                *sample = match ch {
                    0 => T::from_sample(left),
                    1 => T::from_sample(right),
                    _ => T::EQUILIBRIUM,
                };
            }
        }
    }
}

/// Sink playing on the default output device
pub struct CpalAudioSink {
    _stream: Stream,
    sender: Sender<Vec<i16>>,
    sample_rate: u32,
    buffer_frames: usize,
}

impl CpalAudioSink {
    /// Open the default output device and start playback
    pub fn open(buffer_frames: usize) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        tracing::info!(
            "Audio device: {}",
            device.name().unwrap_or_else(|_| "Unknown".to_string())
        );

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::Stream(format!("Failed to get output config: {}", e)))?;
        let format = supported.sample_format();
        let config: StreamConfig = supported.config();
        let sample_rate = config.sample_rate.0;

        tracing::info!(
            "Audio config: {} Hz, {} channels, {:?}",
            sample_rate,
            config.channels,
            format
        );

        let (sender, receiver) = channel::bounded(1);
        let feed = Feed {
            receiver,
            pending: Vec::new(),
            position: 0,
        };

        let stream = match format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, feed)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, feed)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, feed)?,
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        };

        stream
            .play()
            .map_err(|e| AudioError::Stream(format!("Failed to play stream: {}", e)))?;
        tracing::info!("Audio stream started");

        Ok(Self {
            _stream: stream,
            sender,
            sample_rate,
            buffer_frames,
        })
    }

    fn build_stream<T: SizedSample + FromSample<i16>>(
        device: &cpal::Device,
        config: &StreamConfig,
        mut feed: Feed,
    ) -> Result<Stream, AudioError> {
        let channels = usize::from(config.channels);
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| feed.fill(data, channels),
                |err| {
                    tracing::error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::Stream(format!("Failed to build output stream: {}", e)))
    }

    /// Longest a submission may wait before the device is considered stalled
    fn stall_timeout(&self) -> Duration {
        let period = self.buffer_frames as f64 / f64::from(self.sample_rate.max(1));
        Duration::from_secs_f64(period * 4.0)
    }
}

impl AudioSink for CpalAudioSink {
    fn submit(&mut self, frames: &[i16]) -> Result<(), AudioError> {
        match self.sender.send_timeout(frames.to_vec(), self.stall_timeout()) {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(_)) => {
                Err(AudioError::Stream("device stopped consuming audio".to_string()))
            }
            Err(SendTimeoutError::Disconnected(_)) => Err(AudioError::Disconnected),
        }
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn buffer_frames(&self) -> usize {
        self.buffer_frames
    }
}
