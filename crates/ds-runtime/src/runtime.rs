//! Core lifecycle: boot, start, stop, reload

use crate::driver::{DriverSettings, ExecutionDriver};
use ds_core::{BootError, CartridgeSlot, Config, Core, CoreLoader, FrontendError, RomSet};

/// Boots cores from ROM sets and runs them on an [`ExecutionDriver`].
///
/// Any previous core is stopped, flushed and released before a new one is
/// constructed. A failed boot leaves no core and no worker behind.
pub struct Runtime<L: CoreLoader> {
    loader: L,
    config: Config,
    settings: DriverSettings,
    roms: RomSet,
    driver: Option<ExecutionDriver<L::Core>>,
}

impl<L: CoreLoader> Runtime<L> {
    pub fn new(loader: L, config: Config) -> Self {
        let settings = DriverSettings::from_config(&config);
        Self::with_settings(loader, config, settings)
    }

    pub fn with_settings(loader: L, config: Config, settings: DriverSettings) -> Self {
        Self {
            loader,
            config,
            settings,
            roms: RomSet::default(),
            driver: None,
        }
    }

    /// Construct a core for `roms`, replacing any current one. Nothing is
    /// started.
    pub fn boot(&mut self, roms: RomSet) -> Result<(), BootError> {
        self.shutdown();
        self.roms = roms;

        match self.loader.boot(&self.roms) {
            Ok(core) => {
                self.driver = Some(ExecutionDriver::new(core, self.settings.clone()));
                Ok(())
            }
            Err(e) => {
                tracing::error!("{}: {}", e.title(), e);
                Err(e)
            }
        }
    }

    /// Boot `roms` and start running them
    pub fn load(&mut self, roms: RomSet) -> Result<(), FrontendError> {
        self.boot(roms)?;
        self.start()?;
        Ok(())
    }

    /// Start the booted core's workers. Returns false if no core is booted.
    pub fn start(&mut self) -> Result<bool, FrontendError> {
        match self.driver.as_mut() {
            Some(driver) => {
                driver.start()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Stop the workers, keeping the core. Returns how many were joined.
    pub fn stop(&mut self) -> usize {
        self.driver.as_mut().map_or(0, |driver| driver.stop())
    }

    /// Stop the workers and release the core
    pub fn shutdown(&mut self) -> usize {
        match self.driver.take() {
            Some(mut driver) => {
                let joined = driver.stop();
                drop(driver);
                tracing::debug!("Core released");
                joined
            }
            None => 0,
        }
    }

    /// Reboot the current ROMs from scratch and start them
    pub fn restart(&mut self) -> Result<(), FrontendError> {
        let roms = self.roms.clone();
        self.load(roms)
    }

    /// Change a cartridge's save size, then restart.
    ///
    /// The resized (erased) save is written out before the core is rebooted,
    /// so the new core loads it. Fails with [`FrontendError::NoCore`] when
    /// nothing is booted. If the resize or flush fails, the current core is
    /// started again unchanged.
    pub fn change_save_type(
        &mut self,
        slot: CartridgeSlot,
        size: usize,
    ) -> Result<(), FrontendError> {
        let Some(driver) = self.driver.as_mut() else {
            return Err(FrontendError::NoCore);
        };

        driver.stop();
        let core = driver.core();
        let resized = core
            .resize_save(slot, size)
            .and_then(|()| core.flush_save(slot).map(drop));
        if let Err(e) = resized {
            tracing::error!("Failed to change {} save size: {}", slot, e);
            driver.start()?;
            return Err(e.into());
        }

        tracing::info!("Changed {} save size to {} bytes", slot, size);
        self.restart()
    }

    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(|driver| driver.is_running())
    }

    /// The booted core, running or not
    pub fn core(&self) -> Option<&L::Core> {
        self.driver.as_ref().map(|driver| driver.core())
    }

    /// The core while it runs, for presentation and input
    pub fn running_core(&self) -> Option<&L::Core> {
        self.driver.as_ref().and_then(|driver| driver.running_core())
    }

    pub fn fps(&self) -> Option<u32> {
        self.running_core().and_then(|core| core.fps())
    }

    pub fn roms(&self) -> &RomSet {
        &self.roms
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: CoreLoader> Drop for Runtime<L> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
