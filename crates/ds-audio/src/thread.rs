//! Audio worker thread

use crate::backend::{AudioSink, NullAudioSink, SinkFactory};
use crate::resampler::NearestResampler;
use ds_core::{Core, RunToken};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

const FALLBACK_RATE: u32 = 48000;
const FALLBACK_FRAMES: usize = 1024;

/// Pulls native samples from the core and feeds a host sink.
///
/// The worker is the only caller of `Core::request_samples`.
pub struct AudioWorker<C: Core> {
    core: Arc<C>,
    token: RunToken,
    native_rate: u32,
}

impl<C: Core> AudioWorker<C> {
    pub fn new(core: Arc<C>, token: RunToken, native_rate: u32) -> Self {
        Self {
            core,
            token,
            native_rate,
        }
    }

    /// Start the worker on its own thread.
    ///
    /// The sink is opened on that thread. If it cannot be opened the worker
    /// falls back to a null sink, which still drains the core's samples.
    pub fn spawn(self, factory: SinkFactory) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("audio".to_string())
            .spawn(move || {
                let mut sink: Box<dyn AudioSink> = match factory() {
                    Ok(sink) => sink,
                    Err(e) => {
                        tracing::warn!("Audio output unavailable ({}), using null output", e);
                        Box::new(NullAudioSink::new(FALLBACK_RATE, FALLBACK_FRAMES))
                    }
                };
                self.run(sink.as_mut());
            })
    }

    /// Loop until the token is cleared
    pub fn run(&self, sink: &mut dyn AudioSink) {
        let resampler =
            NearestResampler::for_rates(sink.buffer_frames(), self.native_rate, sink.sample_rate());
        let mut buffer = vec![0i16; resampler.host_len() * 2];

        tracing::info!(
            "Audio worker started: {} native frames -> {} frames at {} Hz",
            resampler.native_len(),
            resampler.host_len(),
            sink.sample_rate()
        );

        let mut failures = 0u64;
        while self.token.is_running() {
            let batch = self.core.request_samples(resampler.native_len());
            resampler.resample(&batch, &mut buffer);

            if let Err(e) = sink.submit(&buffer) {
                failures += 1;
                tracing::warn!("Audio submission failed ({} so far): {}", failures, e);
            }
        }

        tracing::info!("Audio worker stopped");
    }
}
