//! Presentation state for the host's render thread

use crate::pacing::{FramePacer, TickOutcome};
use ds_core::{Config, Core, FrameBuffer};
use ds_layout::{LayoutConfig, ScreenLayout, TouchPoint};
use std::time::Instant;

/// Owns the frame buffer, the pacer and the current screen layout.
///
/// The layout is recomputed whenever the output is resized, the layout
/// configuration changes, or the core enters or leaves the cropped
/// single-screen GBA mode.
pub struct Presenter {
    pacer: FramePacer,
    buffer: FrameBuffer,
    config: LayoutConfig,
    layout: ScreenLayout,
    width: u32,
    height: u32,
    cropped: bool,
    show_fps: bool,
    fps: Option<u32>,
}

impl Presenter {
    pub fn new(width: u32, height: u32, config: LayoutConfig, high_res: bool) -> Self {
        Self {
            pacer: FramePacer::new(),
            buffer: FrameBuffer::new(high_res),
            config,
            layout: ScreenLayout::compute(width, height, &config, false),
            width,
            height,
            cropped: false,
            show_fps: false,
            fps: None,
        }
    }

    /// Create a presenter from the frontend configuration
    pub fn from_config(config: &Config, width: u32, height: u32) -> Self {
        let mut presenter = Self::new(width, height, config.layout, config.video.high_res_3d);
        presenter.show_fps = config.general.show_fps_counter;
        presenter
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.relayout();
        }
    }

    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        if config != self.config {
            self.config = config;
            self.relayout();
        }
    }

    /// Switch the frame buffer between native and doubled resolution
    pub fn set_high_res(&mut self, high_res: bool) {
        if high_res != self.buffer.is_high_res() {
            self.buffer = FrameBuffer::new(high_res);
        }
    }

    pub fn set_show_fps(&mut self, show: bool) {
        self.show_fps = show;
    }

    /// Run one render tick now
    pub fn tick<C: Core + ?Sized>(&mut self, core: Option<&C>) -> TickOutcome {
        self.tick_at(Instant::now(), core)
    }

    /// Run one render tick at a given instant
    pub fn tick_at<C: Core + ?Sized>(&mut self, now: Instant, core: Option<&C>) -> TickOutcome {
        if let Some(core) = core {
            let crop = core.is_gba_mode() && self.config.gba_crop;
            if crop != self.cropped {
                self.cropped = crop;
                self.relayout();
            }
            self.fps = core.fps();
        } else {
            self.fps = None;
        }

        self.pacer.tick_at(now, core, &mut self.buffer, self.cropped)
    }

    fn relayout(&mut self) {
        self.layout = ScreenLayout::compute(self.width, self.height, &self.config, self.cropped);
        if self.layout.is_below_minimum() {
            tracing::debug!(
                "Output {}x{} is below the minimum {}x{}",
                self.width,
                self.height,
                self.layout.min_width,
                self.layout.min_height
            );
        }
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn is_cropped(&self) -> bool {
        self.cropped
    }

    /// Map a pointer position to the touch screen
    pub fn touch_point(&self, x: i32, y: i32) -> Option<TouchPoint> {
        self.layout.touch_point(x, y)
    }

    /// Text for the FPS overlay, when enabled and the core reports a rate
    pub fn fps_text(&self) -> Option<String> {
        if !self.show_fps {
            return None;
        }
        self.fps.map(|fps| format!("FPS: {}", fps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ds_core::{CartridgeSlot, DsKey, SampleBatch, SaveError};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct ModeSwitchingCore {
        gba: AtomicBool,
    }

    impl Core for ModeSwitchingCore {
        fn run_frame(&self) {}

        fn poll_frame(&self, _buffer: &mut FrameBuffer, _crop: bool) -> bool {
            true
        }

        fn request_samples(&self, count: usize) -> SampleBatch {
            vec![Default::default(); count]
        }

        fn save_slots(&self) -> Vec<CartridgeSlot> {
            Vec::new()
        }

        fn flush_save(&self, _slot: CartridgeSlot) -> Result<bool, SaveError> {
            Ok(false)
        }

        fn resize_save(&self, _slot: CartridgeSlot, _size: usize) -> Result<(), SaveError> {
            Ok(())
        }

        fn press_key(&self, _key: DsKey) {}
        fn release_key(&self, _key: DsKey) {}
        fn touch(&self, _x: u16, _y: u16) {}
        fn release_touch(&self) {}

        fn fps(&self) -> Option<u32> {
            Some(60)
        }

        fn is_gba_mode(&self) -> bool {
            self.gba.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_gba_mode_switches_layout() {
        let config = LayoutConfig {
            gba_crop: true,
            ..Default::default()
        };
        let mut presenter = Presenter::new(480, 720, config, false);
        let core = ModeSwitchingCore::default();

        presenter.tick(Some(&core));
        assert!(!presenter.is_cropped());
        assert!(!presenter.layout().bottom.is_empty());

        core.gba.store(true, Ordering::SeqCst);
        presenter.tick(Some(&core));
        assert!(presenter.is_cropped());
        assert!(presenter.layout().bottom.is_empty());
        assert_eq!(presenter.touch_point(240, 360), None);
    }

    #[test]
    fn test_crop_requires_config() {
        let mut presenter = Presenter::new(480, 720, LayoutConfig::default(), false);
        let core = ModeSwitchingCore::default();
        core.gba.store(true, Ordering::SeqCst);

        presenter.tick(Some(&core));
        assert!(!presenter.is_cropped());
    }

    #[test]
    fn test_resize_recomputes() {
        let mut presenter = Presenter::new(256, 384, LayoutConfig::default(), false);
        let before = *presenter.layout();
        presenter.resize(512, 768);
        assert_ne!(before, *presenter.layout());
        assert_eq!(presenter.layout().output_width, 512);
    }

    #[test]
    fn test_fps_text() {
        let mut config = Config::default();
        config.general.show_fps_counter = true;
        let mut presenter = Presenter::from_config(&config, 256, 384);
        assert_eq!(presenter.fps_text(), None);

        presenter.tick(Some(&ModeSwitchingCore::default()));
        assert_eq!(presenter.fps_text().as_deref(), Some("FPS: 60"));

        // Stale rate is dropped once the core stops
        presenter.tick(None::<&ModeSwitchingCore>);
        assert_eq!(presenter.fps_text(), None);

        presenter.tick(Some(&ModeSwitchingCore::default()));
        presenter.set_show_fps(false);
        assert_eq!(presenter.fps_text(), None);
    }

    #[test]
    fn test_high_res_buffer() {
        let mut presenter = Presenter::new(256, 384, LayoutConfig::default(), false);
        presenter.set_high_res(true);
        assert_eq!(presenter.frame().len(), 256 * 192 * 8);
    }
}
