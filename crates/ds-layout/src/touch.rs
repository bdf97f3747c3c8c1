//! Pointer to touch-screen coordinate mapping

use crate::config::ScreenRotation;
use crate::layout::ScreenLayout;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Coordinate in the native 256x192 space of the touch screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TouchPoint {
    pub x: u16,
    pub y: u16,
}

impl ScreenLayout {
    /// Map an output coordinate to the touch screen's native space.
    ///
    /// Coordinates outside the touch screen are clamped to its nearest edge.
    /// Returns `None` only in cropped mode, where no touch screen is shown.
    pub fn touch_point(&self, x: i32, y: i32) -> Option<TouchPoint> {
        if self.cropped {
            return None;
        }

        let rect = self.bottom;
        let width = rect.width.max(1) as i64;
        let height = rect.height.max(1) as i64;

        // Position relative to the screen origin, clamped inside it
        let local_x = (x as i64 - rect.x as i64).clamp(0, width - 1);
        let local_y = (y as i64 - rect.y as i64).clamp(0, height - 1);

        let native_w = SCREEN_WIDTH as i64;
        let native_h = SCREEN_HEIGHT as i64;

        let (touch_x, touch_y) = match self.config.rotation {
            ScreenRotation::None => (local_x * native_w / width, local_y * native_h / height),
            ScreenRotation::Clockwise => (
                local_y * native_w / height,
                native_h - 1 - local_x * native_h / width,
            ),
            ScreenRotation::CounterClockwise => (
                native_w - 1 - local_y * native_w / height,
                local_x * native_h / width,
            ),
        };

        Some(TouchPoint {
            x: touch_x.clamp(0, native_w - 1) as u16,
            y: touch_y.clamp(0, native_h - 1) as u16,
        })
    }
}
