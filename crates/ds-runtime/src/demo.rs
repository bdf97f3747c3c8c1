//! Built-in test pattern core
//!
//! Stands in for a real emulator core so the runtime can be run and
//! observed without one. Frames show a moving stripe on the top screen and
//! the touch position on the bottom screen, held buttons light up a row of
//! markers, and holding A plays a square wave. The DS save records how many
//! seconds the core has run.

use ds_core::config::PathConfig;
use ds_core::{
    BootError, CartridgeSlot, Core, CoreLoader, DsKey, FrameBuffer, RomSet, SampleBatch,
    SaveError, StereoSample,
};
use ds_save::SaveFile;
use parking_lot::Mutex;
use std::path::Path;
use std::time::{Duration, Instant};

const FRAME_PERIOD: Duration = Duration::from_micros(16_715);
const NATIVE_RATE: u32 = 32768;
const TONE_HZ: u32 = 440;
const TONE_AMPLITUDE: i16 = 0x0800;
const DEFAULT_SAVE_SIZE: usize = 0x2000;

const TOP_COLOR: u32 = 0xFF20_2060;
const BOTTOM_COLOR: u32 = 0xFF30_3030;
const STRIPE_COLOR: u32 = 0xFFFF_FFFF;
const MARKER_COLOR: u32 = 0xFFFF_C000;
const TOUCH_COLOR: u32 = 0xFF00_FF00;

#[derive(Debug)]
struct DemoState {
    frames: u64,
    frame_ready: bool,
    held: [bool; DsKey::COUNT],
    touch: Option<(u16, u16)>,
    fps: u32,
    frames_this_second: u32,
    second_started: Instant,
    seconds_run: u32,
}

/// Test pattern core
#[derive(Debug)]
pub struct DemoCore {
    state: Mutex<DemoState>,
    tone_phase: Mutex<u32>,
    nds_save: Option<Mutex<SaveFile>>,
    gba_save: Option<Mutex<SaveFile>>,
    gba_mode: bool,
}

impl DemoCore {
    /// Create a core with optional save files for each slot
    pub fn new(nds_save: Option<SaveFile>, gba_save: Option<SaveFile>, gba_mode: bool) -> Self {
        Self {
            state: Mutex::new(DemoState {
                frames: 0,
                frame_ready: false,
                held: [false; DsKey::COUNT],
                touch: None,
                fps: 0,
                frames_this_second: 0,
                second_started: Instant::now(),
                seconds_run: 0,
            }),
            tone_phase: Mutex::new(0),
            nds_save: nds_save.map(Mutex::new),
            gba_save: gba_save.map(Mutex::new),
            gba_mode,
        }
    }

    /// Frames emulated so far
    pub fn frame_count(&self) -> u64 {
        self.state.lock().frames
    }

    fn save(&self, slot: CartridgeSlot) -> Result<&Mutex<SaveFile>, SaveError> {
        let save = match slot {
            CartridgeSlot::Nds => self.nds_save.as_ref(),
            CartridgeSlot::Gba => self.gba_save.as_ref(),
        };
        save.ok_or(SaveError::NoSlot(slot.name()))
    }

    /// Advance one frame without waiting for its period
    fn step(&self) {
        let mut state = self.state.lock();
        state.frames += 1;
        state.frame_ready = true;
        state.frames_this_second += 1;

        if state.second_started.elapsed() >= Duration::from_secs(1) {
            state.fps = state.frames_this_second;
            state.frames_this_second = 0;
            state.second_started = Instant::now();
            state.seconds_run += 1;

            if let Some(save) = &self.nds_save {
                save.lock().write(0, &state.seconds_run.to_le_bytes());
            }
        }
    }

    fn draw_screen(pixels: &mut [u32], width: usize, height: usize, color: u32) {
        for pixel in pixels.iter_mut().take(width * height) {
            *pixel = color;
        }
    }

    fn draw(state: &DemoState, buffer: &mut FrameBuffer, crop: bool) {
        let shift = buffer.shift();
        let pixels = buffer.pixels_mut();

        let (width, height) = if crop {
            (240usize << shift, 160usize << shift)
        } else {
            (256usize << shift, 192usize << shift)
        };

        Self::draw_screen(pixels, width, height, TOP_COLOR);

        // Moving stripe
        let stripe_y = (state.frames as usize * 2) % height;
        for dy in 0..(4 << shift) {
            let y = (stripe_y + dy) % height;
            pixels[y * width..(y + 1) * width].fill(STRIPE_COLOR);
        }

        // One marker per held button along the top edge
        let marker = 8 << shift;
        for (i, &held) in state.held.iter().enumerate() {
            if !held {
                continue;
            }
            for y in 0..marker {
                let start = y * width + i * (marker + (2 << shift));
                let end = (start + marker).min((y + 1) * width);
                pixels[start..end].fill(MARKER_COLOR);
            }
        }

        if crop {
            return;
        }

        let bottom = &mut pixels[width * height..width * height * 2];
        Self::draw_screen(bottom, width, height, BOTTOM_COLOR);

        if let Some((x, y)) = state.touch {
            let x = (x as usize) << shift;
            let y = (y as usize) << shift;
            bottom[y * width..(y + 1) * width].fill(TOUCH_COLOR);
            for row in 0..height {
                bottom[row * width + x] = TOUCH_COLOR;
            }
        }
    }
}

impl Core for DemoCore {
    fn run_frame(&self) {
        let started = Instant::now();
        self.step();
        if let Some(rest) = FRAME_PERIOD.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    fn poll_frame(&self, buffer: &mut FrameBuffer, crop: bool) -> bool {
        let mut state = self.state.lock();
        if !state.frame_ready {
            return false;
        }
        state.frame_ready = false;
        Self::draw(&state, buffer, crop);
        true
    }

    fn request_samples(&self, count: usize) -> SampleBatch {
        let playing = self.state.lock().held[DsKey::A.index()];
        let mut phase = self.tone_phase.lock();
        let half_period = NATIVE_RATE / TONE_HZ / 2;

        (0..count)
            .map(|_| {
                *phase = (*phase + 1) % (half_period * 2);
                if !playing {
                    return StereoSample::SILENCE;
                }
                let level = if *phase < half_period {
                    TONE_AMPLITUDE
                } else {
                    -TONE_AMPLITUDE
                };
                StereoSample::new(level, level)
            })
            .collect()
    }

    fn save_slots(&self) -> Vec<CartridgeSlot> {
        CartridgeSlot::ALL
            .into_iter()
            .filter(|&slot| self.save(slot).is_ok())
            .collect()
    }

    fn flush_save(&self, slot: CartridgeSlot) -> Result<bool, SaveError> {
        self.save(slot)?.lock().flush()
    }

    fn resize_save(&self, slot: CartridgeSlot, size: usize) -> Result<(), SaveError> {
        self.save(slot)?.lock().resize(size);
        Ok(())
    }

    fn press_key(&self, key: DsKey) {
        self.state.lock().held[key.index()] = true;
    }

    fn release_key(&self, key: DsKey) {
        self.state.lock().held[key.index()] = false;
    }

    fn touch(&self, x: u16, y: u16) {
        self.state.lock().touch = Some((x.min(255), y.min(191)));
    }

    fn release_touch(&self) {
        self.state.lock().touch = None;
    }

    fn fps(&self) -> Option<u32> {
        Some(self.state.lock().fps)
    }

    fn is_gba_mode(&self) -> bool {
        self.gba_mode
    }
}

/// Boots [`DemoCore`]s.
///
/// ROM files must be readable. With `require_system_files` set, the BIOS
/// and firmware paths must exist too, as they would for a real core.
#[derive(Debug, Clone)]
pub struct DemoLoader {
    pub paths: PathConfig,
    pub require_system_files: bool,
    pub direct_boot: bool,
}

impl DemoLoader {
    pub fn new(paths: PathConfig) -> Self {
        Self {
            paths,
            require_system_files: false,
            direct_boot: true,
        }
    }

    fn check_rom(path: &Path) -> Result<(), BootError> {
        std::fs::File::open(path).map(drop).map_err(|e| {
            tracing::warn!("Cannot read ROM {:?}: {}", path, e);
            BootError::RomUnreadable
        })
    }

    fn open_save(rom: &Path) -> Result<SaveFile, BootError> {
        SaveFile::open(SaveFile::path_for_rom(rom), DEFAULT_SAVE_SIZE).map_err(|e| {
            tracing::warn!("{}", e);
            BootError::RomUnreadable
        })
    }
}

impl CoreLoader for DemoLoader {
    type Core = DemoCore;

    fn boot(&self, roms: &RomSet) -> Result<DemoCore, BootError> {
        if self.require_system_files {
            if !self.paths.bios7.exists() || !self.paths.bios9.exists() {
                return Err(BootError::BiosMissing);
            }
            if roms.gba.is_some() && !self.paths.gba_bios.exists() {
                return Err(BootError::BiosMissing);
            }
            // Without a direct-bootable cartridge the firmware has to boot
            let firmware_boot = roms.nds.is_none() || !self.direct_boot;
            if firmware_boot && !self.paths.firmware.exists() {
                return Err(BootError::FirmwareUnbootable);
            }
        }

        let mut nds_save = None;
        if let Some(rom) = &roms.nds {
            Self::check_rom(rom)?;
            nds_save = Some(Self::open_save(rom)?);
        }

        let mut gba_save = None;
        if let Some(rom) = &roms.gba {
            Self::check_rom(rom)?;
            gba_save = Some(Self::open_save(rom)?);
        }

        let gba_mode = roms.nds.is_none() && roms.gba.is_some();
        tracing::info!(
            "Booted demo core (nds={:?}, gba={:?}, gba_mode={})",
            roms.nds,
            roms.gba,
            gba_mode
        );
        Ok(DemoCore::new(nds_save, gba_save, gba_mode))
    }
}
