//! Screen layout engine for the dsfront runtime
//!
//! Places the two emulated screens (or the single cropped GBA screen) inside
//! an arbitrary output area and maps pointer coordinates back into the native
//! space of the touch screen. Everything here is a pure function of the
//! output size and a [`LayoutConfig`] value.

pub mod config;
pub mod layout;
pub mod touch;

pub use config::{
    LayoutConfig, ScreenArrangement, ScreenGap, ScreenPosition, ScreenRotation, ScreenSizing,
};
pub use layout::{Rect, Screen, ScreenLayout};
pub use touch::TouchPoint;

/// Native width of one DS screen
pub const SCREEN_WIDTH: u32 = 256;
/// Native height of one DS screen
pub const SCREEN_HEIGHT: u32 = 192;
/// Native width of the GBA screen shown in cropped mode
pub const GBA_WIDTH: u32 = 240;
/// Native height of the GBA screen shown in cropped mode
pub const GBA_HEIGHT: u32 = 160;
