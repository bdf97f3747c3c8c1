//! Frame buffer shared between the core and the presentation layer

use ds_layout::{GBA_HEIGHT, GBA_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Pixels in one native DS screen
pub const SCREEN_PIXELS: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

/// Pixel storage for both screens.
///
/// Sized for the largest frame the core can produce: two DS screens, at
/// twice the resolution in each axis when high-resolution 3D is enabled.
/// The core overwrites it in place on a successful frame poll.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Vec<u32>,
    high_res: bool,
}

impl FrameBuffer {
    /// Create a zeroed frame buffer
    pub fn new(high_res: bool) -> Self {
        let shift = Self::shift_for(high_res);
        Self {
            pixels: vec![0; (SCREEN_PIXELS * 2) << (shift * 2)],
            high_res,
        }
    }

    fn shift_for(high_res: bool) -> usize {
        usize::from(high_res)
    }

    /// Resolution shift (0 or 1) applied to both axes
    pub fn shift(&self) -> usize {
        Self::shift_for(self.high_res)
    }

    pub fn is_high_res(&self) -> bool {
        self.high_res
    }

    /// Total capacity in pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Dimensions of one DS screen in this buffer
    pub fn screen_dimensions(&self) -> (u32, u32) {
        (SCREEN_WIDTH << self.shift(), SCREEN_HEIGHT << self.shift())
    }

    /// Dimensions of the GBA screen in this buffer
    pub fn gba_dimensions(&self) -> (u32, u32) {
        (GBA_WIDTH << self.shift(), GBA_HEIGHT << self.shift())
    }

    /// Top screen pixels
    pub fn top(&self) -> &[u32] {
        let n = SCREEN_PIXELS << (self.shift() * 2);
        &self.pixels[..n]
    }

    /// Bottom screen pixels
    pub fn bottom(&self) -> &[u32] {
        let n = SCREEN_PIXELS << (self.shift() * 2);
        &self.pixels[n..n * 2]
    }

    /// GBA screen pixels, stored at the start of the buffer in cropped mode
    pub fn gba(&self) -> &[u32] {
        let (w, h) = self.gba_dimensions();
        &self.pixels[..(w * h) as usize]
    }

    /// Blank both screens
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }
}
