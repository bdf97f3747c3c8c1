//! Execution driver
//!
//! Owns the booted core and its three workers:
//! - execution: runs frames back to back
//! - audio: feeds the host sink ([`AudioWorker`])
//! - save: flushes cartridge saves ([`SaveFlusher`])
//!
//! The core is shared with the workers through an `Arc`, and the only ways to
//! release it (`replace_core`, `into_core`, drop) join every worker first.

use ds_audio::backend::{null_sink_factory, SinkFactory};
use ds_audio::AudioWorker;
use ds_core::{Config, Core, FrontendError, RunToken};
use ds_save::{SaveFlusher, WakeSignal, DEFAULT_FLUSH_INTERVAL};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Worker parameters taken from the configuration
#[derive(Clone)]
pub struct DriverSettings {
    pub native_sample_rate: u32,
    pub flush_interval: Duration,
    pub sink_factory: SinkFactory,
}

impl DriverSettings {
    /// Null audio output at the configured host rate
    pub fn headless(config: &Config) -> Self {
        Self {
            native_sample_rate: config.audio.native_sample_rate,
            flush_interval: config.flush_interval(),
            sink_factory: null_sink_factory(
                config.audio.host_sample_rate,
                config.audio.host_buffer_frames as usize,
            ),
        }
    }

    /// Host audio output when enabled and compiled in, null output otherwise
    pub fn from_config(config: &Config) -> Self {
        let settings = Self::headless(config);
        if !config.audio.enable {
            return settings;
        }

        #[cfg(feature = "cpal")]
        let settings = {
            let frames = config.audio.host_buffer_frames as usize;
            let factory: SinkFactory = Arc::new(move || {
                ds_audio::CpalAudioSink::open(frames)
                    .map(|sink| Box::new(sink) as Box<dyn ds_audio::AudioSink>)
            });
            settings.with_sink_factory(factory)
        };

        settings
    }

    pub fn with_sink_factory(mut self, factory: SinkFactory) -> Self {
        self.sink_factory = factory;
        self
    }

    pub fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            native_sample_rate: 32768,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            sink_factory: null_sink_factory(48000, 1024),
        }
    }
}

impl std::fmt::Debug for DriverSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverSettings")
            .field("native_sample_rate", &self.native_sample_rate)
            .field("flush_interval", &self.flush_interval)
            .finish_non_exhaustive()
    }
}

/// Runs a booted core on the worker threads
pub struct ExecutionDriver<C: Core> {
    core: Arc<C>,
    settings: DriverSettings,
    token: RunToken,
    signal: WakeSignal,
    workers: Vec<JoinHandle<()>>,
}

impl<C: Core> ExecutionDriver<C> {
    /// Take ownership of a booted core. No worker runs until [`start`](Self::start).
    pub fn new(core: C, settings: DriverSettings) -> Self {
        Self {
            core: Arc::new(core),
            settings,
            token: RunToken::new(),
            signal: WakeSignal::new(),
            workers: Vec::new(),
        }
    }

    /// Spawn the execution, audio and save workers.
    ///
    /// Does nothing if they are already running. If a worker cannot be
    /// spawned, the ones already started are joined before returning.
    pub fn start(&mut self) -> Result<(), FrontendError> {
        if !self.workers.is_empty() {
            return Ok(());
        }

        self.token.start();
        self.signal = WakeSignal::new();

        if let Err(e) = self.spawn_workers() {
            tracing::error!("Failed to start workers: {}", e);
            self.stop();
            return Err(e.into());
        }

        tracing::info!("Core started");
        Ok(())
    }

    fn spawn_workers(&mut self) -> std::io::Result<()> {
        let core = Arc::clone(&self.core);
        let token = self.token.clone();
        let execution = thread::Builder::new()
            .name("execution".to_string())
            .spawn(move || {
                while token.is_running() {
                    core.run_frame();
                }
            })?;
        self.workers.push(execution);

        let audio = AudioWorker::new(
            Arc::clone(&self.core),
            self.token.clone(),
            self.settings.native_sample_rate,
        )
        .spawn(Arc::clone(&self.settings.sink_factory))?;
        self.workers.push(audio);

        let save = SaveFlusher::new(Arc::clone(&self.core), self.token.clone(), self.signal.clone())
            .with_interval(self.settings.flush_interval)
            .spawn()?;
        self.workers.push(save);

        Ok(())
    }

    /// Stop and join every worker. Returns how many were joined.
    ///
    /// The save worker is woken immediately and performs its final flush
    /// before it is joined. Calling this again is a no-op.
    pub fn stop(&mut self) -> usize {
        self.token.stop();
        self.signal.raise();

        let mut joined = 0;
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                tracing::error!("{} worker panicked", name);
            }
            joined += 1;
        }

        if joined > 0 {
            tracing::info!("Core stopped, {} workers joined", joined);
        }
        joined
    }

    pub fn is_running(&self) -> bool {
        !self.workers.is_empty()
    }

    /// The core, for the presentation and input thread
    pub fn core(&self) -> &C {
        &self.core
    }

    /// The core while its workers run
    pub fn running_core(&self) -> Option<&C> {
        self.is_running().then_some(&*self.core)
    }

    pub fn settings(&self) -> &DriverSettings {
        &self.settings
    }

    /// Stop the workers and swap in another core. The old core is dropped
    /// only after every worker has been joined.
    pub fn replace_core(&mut self, core: C) {
        self.stop();
        self.core = Arc::new(core);
    }

    /// Stop the workers and hand back the core
    pub fn into_core(mut self) -> Option<C> {
        self.stop();
        let core = Arc::clone(&self.core);
        drop(self);
        Arc::into_inner(core)
    }
}

impl<C: Core> Drop for ExecutionDriver<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
