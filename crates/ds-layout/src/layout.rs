//! Screen placement
//!
//! Computes where each emulated screen is drawn inside the output area. The
//! computation carries no state between calls, so it can be redone on every
//! resize and on every switch into or out of the cropped GBA mode.

use crate::config::{LayoutConfig, ScreenPosition};
use crate::{GBA_HEIGHT, GBA_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Rectangle in output pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x as i64
            && y >= self.y as i64
            && x < self.right() as i64
            && y < self.bottom() as i64
    }

    /// Clip a signed rectangle to `[0, width] x [0, height]`
    fn clipped(x: i64, y: i64, w: i64, h: i64, width: u32, height: u32) -> Self {
        let (out_w, out_h) = (width as i64, height as i64);
        let x0 = x.clamp(0, out_w);
        let y0 = y.clamp(0, out_h);
        let x1 = (x + w).clamp(x0, out_w);
        let y1 = (y + h).clamp(y0, out_h);
        Self::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

/// Emulated screen identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Upper DS screen, or the GBA screen in cropped mode
    Top,
    /// Lower DS screen, the touch screen
    Bottom,
}

/// Result of a layout computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenLayout {
    /// Output area the layout was computed for
    pub output_width: u32,
    pub output_height: u32,
    /// Top screen (or the GBA screen in cropped mode)
    pub top: Rect,
    /// Bottom screen, empty in cropped mode
    pub bottom: Rect,
    /// Output size below which the screens cannot be shown at 1x
    pub min_width: u32,
    pub min_height: u32,
    /// Output pixels per native pixel for an unenlarged screen
    pub scale: f64,
    /// Configuration the layout was computed from
    pub config: LayoutConfig,
    /// Whether only the GBA screen is shown
    pub cropped: bool,
}

impl ScreenLayout {
    /// Compute the layout for an output area.
    ///
    /// `crop` selects the single-screen GBA mode; callers pass
    /// `core_in_gba_mode && config.gba_crop`.
    pub fn compute(width: u32, height: u32, config: &LayoutConfig, crop: bool) -> Self {
        let layout = if crop {
            Self::compute_cropped(width, height, config)
        } else {
            Self::compute_dual(width, height, config)
        };

        tracing::debug!(
            "Layout {}x{} (crop={}): top={:?} bottom={:?} min={}x{} scale={:.3}",
            width,
            height,
            crop,
            layout.top,
            layout.bottom,
            layout.min_width,
            layout.min_height,
            layout.scale
        );

        layout
    }

    fn compute_cropped(width: u32, height: u32, config: &LayoutConfig) -> Self {
        let (w, h) = config.rotation.apply(GBA_WIDTH, GBA_HEIGHT);
        let scale = fit_scale(width, height, w, h, config.integer_scale);

        let screen_w = scaled(w, scale);
        let screen_h = scaled(h, scale);
        let x = (width as i64 - screen_w) / 2;
        let y = (height as i64 - screen_h) / 2;

        Self {
            output_width: width,
            output_height: height,
            top: Rect::clipped(x, y, screen_w, screen_h, width, height),
            bottom: Rect::default(),
            min_width: w,
            min_height: h,
            scale,
            config: *config,
            cropped: true,
        }
    }

    fn compute_dual(width: u32, height: u32, config: &LayoutConfig) -> Self {
        let (w, h) = config.rotation.apply(SCREEN_WIDTH, SCREEN_HEIGHT);
        let (top_weight, bottom_weight) = config.sizing.weights();
        let gap = config.gap.native_pixels();
        let vertical = config.is_vertical();

        // Native size of the whole screen group at 1x
        let (content_w, content_h) = if vertical {
            (w * top_weight.max(bottom_weight), h * (top_weight + bottom_weight) + gap)
        } else {
            (w * (top_weight + bottom_weight) + gap, h * top_weight.max(bottom_weight))
        };

        let scale = fit_scale(width, height, content_w, content_h, config.integer_scale);

        let top_size = (scaled(w * top_weight, scale), scaled(h * top_weight, scale));
        let bottom_size = (scaled(w * bottom_weight, scale), scaled(h * bottom_weight, scale));
        let gap_px = scaled(gap, scale);

        // Rotating clockwise turns the top screen to the right of the bottom one
        let top_first = vertical || config.rotation != crate::ScreenRotation::Clockwise;
        let (first, second) = if top_first {
            (top_size, bottom_size)
        } else {
            (bottom_size, top_size)
        };

        let (group_w, group_h) = if vertical {
            (first.0.max(second.0), first.1 + gap_px + second.1)
        } else {
            (first.0 + gap_px + second.0, first.1.max(second.1))
        };

        let (group_x, group_y) = anchor(config.position, width, height, group_w, group_h);

        let place = |size: (i64, i64), offset: i64| -> (i64, i64) {
            if vertical {
                let cross = align(config.position, group_w, size.0, true);
                (group_x + cross, group_y + offset)
            } else {
                let cross = align(config.position, group_h, size.1, false);
                (group_x + offset, group_y + cross)
            }
        };

        let first_pos = place(first, 0);
        let second_offset = if vertical { first.1 } else { first.0 } + gap_px;
        let second_pos = place(second, second_offset);

        let first_rect = Rect::clipped(first_pos.0, first_pos.1, first.0, first.1, width, height);
        let second_rect =
            Rect::clipped(second_pos.0, second_pos.1, second.0, second.1, width, height);
        let (top, bottom) = if top_first {
            (first_rect, second_rect)
        } else {
            (second_rect, first_rect)
        };

        Self {
            output_width: width,
            output_height: height,
            top,
            bottom,
            min_width: content_w,
            min_height: content_h,
            scale,
            config: *config,
            cropped: false,
        }
    }

    /// Rectangle of a screen
    pub fn rect(&self, screen: Screen) -> Rect {
        match screen {
            Screen::Top => self.top,
            Screen::Bottom => self.bottom,
        }
    }

    /// Which screen an output coordinate falls in, if any
    pub fn screen_at(&self, x: i32, y: i32) -> Option<Screen> {
        let (x, y) = (x as i64, y as i64);
        if self.top.contains(x, y) {
            Some(Screen::Top)
        } else if self.bottom.contains(x, y) {
            Some(Screen::Bottom)
        } else {
            None
        }
    }

    /// Scale factor applied to a given screen
    pub fn screen_scale(&self, screen: Screen) -> f64 {
        if self.cropped {
            return self.scale;
        }
        let (top_weight, bottom_weight) = self.config.sizing.weights();
        match screen {
            Screen::Top => self.scale * top_weight as f64,
            Screen::Bottom => self.scale * bottom_weight as f64,
        }
    }

    /// Whether the output area is smaller than the reported minimum
    pub fn is_below_minimum(&self) -> bool {
        self.output_width < self.min_width || self.output_height < self.min_height
    }
}

/// Largest scale at which `content` fits in the output
fn fit_scale(width: u32, height: u32, content_w: u32, content_h: u32, integer: bool) -> f64 {
    let scale_x = width as f64 / content_w as f64;
    let scale_y = height as f64 / content_h as f64;
    let scale = scale_x.min(scale_y);

    if integer {
        scale.floor().max(1.0)
    } else {
        scale
    }
}

fn scaled(native: u32, scale: f64) -> i64 {
    (native as f64 * scale).floor() as i64
}

/// Top-left corner of the screen group for an anchor position
fn anchor(position: ScreenPosition, width: u32, height: u32, group_w: i64, group_h: i64) -> (i64, i64) {
    let (width, height) = (width as i64, height as i64);
    let center_x = (width - group_w) / 2;
    let center_y = (height - group_h) / 2;

    match position {
        ScreenPosition::Center => (center_x, center_y),
        ScreenPosition::Top => (center_x, 0),
        ScreenPosition::Bottom => (center_x, height - group_h),
        ScreenPosition::Left => (0, center_y),
        ScreenPosition::Right => (width - group_w, center_y),
    }
}

/// Offset of a screen along the cross axis of the group
fn align(position: ScreenPosition, group: i64, size: i64, vertical: bool) -> i64 {
    match (position, vertical) {
        (ScreenPosition::Left, true) | (ScreenPosition::Top, false) => 0,
        (ScreenPosition::Right, true) | (ScreenPosition::Bottom, false) => group - size,
        _ => (group - size) / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;

    fn all_configs() -> Vec<LayoutConfig> {
        let positions = [
            ScreenPosition::Center,
            ScreenPosition::Top,
            ScreenPosition::Bottom,
            ScreenPosition::Left,
            ScreenPosition::Right,
        ];
        let rotations = [
            ScreenRotation::None,
            ScreenRotation::Clockwise,
            ScreenRotation::CounterClockwise,
        ];
        let arrangements = [
            ScreenArrangement::Automatic,
            ScreenArrangement::Vertical,
            ScreenArrangement::Horizontal,
        ];
        let sizings = [ScreenSizing::Even, ScreenSizing::EnlargeTop, ScreenSizing::EnlargeBottom];
        let gaps = [ScreenGap::None, ScreenGap::Quarter, ScreenGap::Half, ScreenGap::Full];

        let mut configs = Vec::new();
        for &position in &positions {
            for &rotation in &rotations {
                for &arrangement in &arrangements {
                    for &sizing in &sizings {
                        for &gap in &gaps {
                            for integer_scale in [false, true] {
                                configs.push(LayoutConfig {
                                    position,
                                    rotation,
                                    arrangement,
                                    sizing,
                                    gap,
                                    integer_scale,
                                    gba_crop: true,
                                });
                            }
                        }
                    }
                }
            }
        }
        configs
    }

    const SIZES: [(u32, u32); 9] = [
        (0, 0),
        (1, 1),
        (100, 50),
        (256, 384),
        (640, 480),
        (1280, 720),
        (1920, 1080),
        (333, 1999),
        (4000, 300),
    ];

    #[test]
    fn test_default_vertical_native() {
        let layout = ScreenLayout::compute(256, 384, &LayoutConfig::default(), false);
        assert_eq!(layout.top, Rect::new(0, 0, 256, 192));
        assert_eq!(layout.bottom, Rect::new(0, 192, 256, 192));
        assert_eq!((layout.min_width, layout.min_height), (256, 384));
        assert!(!layout.is_below_minimum());
    }

    #[test]
    fn test_centered_in_wide_output() {
        let layout = ScreenLayout::compute(1280, 720, &LayoutConfig::default(), false);
        // 720 / 384 = 1.875
        assert_eq!(layout.top.height, 360);
        assert_eq!(layout.top.width, 480);
        assert_eq!(layout.top.x, (1280 - 480) / 2);
        assert_eq!(layout.top.y, 0);
        assert_eq!(layout.bottom.y, 360);
    }

    #[test]
    fn test_integer_scale_rounds_down() {
        let config = LayoutConfig {
            integer_scale: true,
            ..Default::default()
        };
        let layout = ScreenLayout::compute(1000, 1000, &config, false);
        assert_eq!(layout.scale, 2.0);
        assert_eq!(layout.top, Rect::new(244, 116, 512, 384));
        assert_eq!(layout.bottom, Rect::new(244, 500, 512, 384));
    }

    #[test]
    fn test_gap_and_position() {
        let config = LayoutConfig {
            gap: ScreenGap::Quarter,
            position: ScreenPosition::Top,
            ..Default::default()
        };
        let layout = ScreenLayout::compute(256, 1000, &config, false);
        assert_eq!(layout.scale, 1.0);
        assert_eq!(layout.top, Rect::new(0, 0, 256, 192));
        assert_eq!(layout.bottom, Rect::new(0, 240, 256, 192));
        assert_eq!(layout.min_height, 432);
    }

    #[test]
    fn test_enlarged_screen_alignment() {
        let config = LayoutConfig {
            arrangement: ScreenArrangement::Horizontal,
            sizing: ScreenSizing::EnlargeTop,
            position: ScreenPosition::Bottom,
            ..Default::default()
        };
        let layout = ScreenLayout::compute(768, 384, &config, false);
        assert_eq!(layout.top, Rect::new(0, 0, 512, 384));
        assert_eq!(layout.bottom, Rect::new(512, 192, 256, 192));
        assert_eq!(layout.screen_scale(Screen::Top), 2.0);
        assert_eq!(layout.screen_scale(Screen::Bottom), 1.0);
    }

    #[test]
    fn test_clockwise_places_top_on_right() {
        let config = LayoutConfig {
            rotation: ScreenRotation::Clockwise,
            ..Default::default()
        };
        let layout = ScreenLayout::compute(384, 256, &config, false);
        assert_eq!(layout.bottom, Rect::new(0, 0, 192, 256));
        assert_eq!(layout.top, Rect::new(192, 0, 192, 256));
    }

    #[test]
    fn test_cropped_mode() {
        let config = LayoutConfig {
            gap: ScreenGap::Full,
            position: ScreenPosition::Left,
            ..Default::default()
        };
        let layout = ScreenLayout::compute(480, 480, &config, true);
        assert!(layout.cropped);
        assert!(layout.bottom.is_empty());
        // Position and gap are ignored: the GBA screen is always centered
        assert_eq!(layout.top, Rect::new(0, 80, 480, 320));
        assert_eq!((layout.min_width, layout.min_height), (240, 160));
    }

    #[test]
    fn test_layout_is_deterministic() {
        for config in all_configs() {
            for &(w, h) in &SIZES {
                for crop in [false, true] {
                    let a = ScreenLayout::compute(w, h, &config, crop);
                    let b = ScreenLayout::compute(w, h, &config, crop);
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_rects_within_output() {
        for config in all_configs() {
            for &(w, h) in &SIZES {
                for crop in [false, true] {
                    let layout = ScreenLayout::compute(w, h, &config, crop);
                    for rect in [layout.top, layout.bottom] {
                        assert!(rect.right() <= w, "{:?} {}x{} {:?}", config, w, h, rect);
                        assert!(rect.bottom() <= h, "{:?} {}x{} {:?}", config, w, h, rect);
                    }
                }
            }
        }
    }

    #[test]
    fn test_integer_scale_always_positive_integer() {
        for config in all_configs().into_iter().filter(|c| c.integer_scale) {
            for &(w, h) in &SIZES {
                for crop in [false, true] {
                    let layout = ScreenLayout::compute(w, h, &config, crop);
                    assert!(layout.scale >= 1.0);
                    assert_eq!(layout.scale.fract(), 0.0);
                    assert_eq!(layout.screen_scale(Screen::Bottom).fract(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_screens_do_not_overlap() {
        for config in all_configs() {
            let layout = ScreenLayout::compute(1920, 1080, &config, false);
            let (a, b) = (layout.top, layout.bottom);
            let overlap_x = a.x < b.right() && b.x < a.right();
            let overlap_y = a.y < b.bottom() && b.y < a.bottom();
            assert!(!(overlap_x && overlap_y), "{:?}", config);
        }
    }

    #[test]
    fn test_screen_at() {
        let layout = ScreenLayout::compute(256, 384, &LayoutConfig::default(), false);
        assert_eq!(layout.screen_at(10, 10), Some(Screen::Top));
        assert_eq!(layout.screen_at(10, 200), Some(Screen::Bottom));
        assert_eq!(layout.screen_at(-1, 10), None);
        assert_eq!(layout.screen_at(10, 384), None);
    }
}
