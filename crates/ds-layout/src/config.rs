//! Layout mode flags

use serde::{Deserialize, Serialize};

/// Where the screen group is anchored in the output area.
///
/// When the two screens differ in size, the smaller one is also aligned to
/// the same side of the larger one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum ScreenPosition {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

/// Rotation applied to the screen contents and to the inverse touch transform
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum ScreenRotation {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
}

impl ScreenRotation {
    /// Whether width and height swap under this rotation
    pub fn is_rotated(self) -> bool {
        self != Self::None
    }

    /// Native (width, height) of a screen after rotation
    pub fn apply(self, width: u32, height: u32) -> (u32, u32) {
        if self.is_rotated() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Texture coordinates for the quad corners of a screen rectangle.
    ///
    /// Corners are ordered bottom-right, bottom-left, top-left, top-right.
    pub fn texture_coords(self) -> [(u8, u8); 4] {
        let bits: u8 = match self {
            Self::None => 0x4B,
            Self::Clockwise => 0x2D,
            Self::CounterClockwise => 0xD2,
        };
        let mut coords = [(0, 0); 4];
        for (i, corner) in coords.iter_mut().enumerate() {
            let shift = i * 2;
            *corner = ((bits >> shift) & 1, (bits >> (shift + 1)) & 1);
        }
        coords
    }
}

/// How the two screens are placed relative to each other
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum ScreenArrangement {
    /// Vertical when unrotated, horizontal when rotated
    #[default]
    Automatic,
    Vertical,
    Horizontal,
}

/// Relative size of the two screens
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum ScreenSizing {
    #[default]
    Even,
    EnlargeTop,
    EnlargeBottom,
}

impl ScreenSizing {
    /// Scale weights for the (top, bottom) screens
    pub fn weights(self) -> (u32, u32) {
        match self {
            Self::Even => (1, 1),
            Self::EnlargeTop => (2, 1),
            Self::EnlargeBottom => (1, 2),
        }
    }
}

/// Gap between the screens, as a fraction of one screen height
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub enum ScreenGap {
    #[default]
    None,
    Quarter,
    Half,
    Full,
}

impl ScreenGap {
    /// Gap in native pixels at 1x scale
    pub fn native_pixels(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Quarter => crate::SCREEN_HEIGHT / 4,
            Self::Half => crate::SCREEN_HEIGHT / 2,
            Self::Full => crate::SCREEN_HEIGHT,
        }
    }
}

/// Immutable layout configuration passed into every layout computation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct LayoutConfig {
    pub position: ScreenPosition,
    pub rotation: ScreenRotation,
    pub arrangement: ScreenArrangement,
    pub sizing: ScreenSizing,
    pub gap: ScreenGap,
    /// Round the scale down to a whole number
    pub integer_scale: bool,
    /// Show only the GBA screen while the core runs in GBA mode
    pub gba_crop: bool,
}

impl LayoutConfig {
    /// Resolve the automatic arrangement
    pub fn is_vertical(&self) -> bool {
        match self.arrangement {
            ScreenArrangement::Vertical => true,
            ScreenArrangement::Horizontal => false,
            ScreenArrangement::Automatic => !self.rotation.is_rotated(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_coords_unrotated() {
        let coords = ScreenRotation::None.texture_coords();
        assert_eq!(coords, [(1, 1), (0, 1), (0, 0), (1, 0)]);
    }

    #[test]
    fn test_texture_coords_rotated() {
        assert_eq!(
            ScreenRotation::Clockwise.texture_coords(),
            [(1, 0), (1, 1), (0, 1), (0, 0)]
        );
        assert_eq!(
            ScreenRotation::CounterClockwise.texture_coords(),
            [(0, 1), (0, 0), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn test_automatic_arrangement() {
        let mut config = LayoutConfig::default();
        assert!(config.is_vertical());

        config.rotation = ScreenRotation::Clockwise;
        assert!(!config.is_vertical());

        config.arrangement = ScreenArrangement::Vertical;
        assert!(config.is_vertical());
    }

    #[test]
    fn test_gap_pixels() {
        assert_eq!(ScreenGap::None.native_pixels(), 0);
        assert_eq!(ScreenGap::Quarter.native_pixels(), 48);
        assert_eq!(ScreenGap::Half.native_pixels(), 96);
        assert_eq!(ScreenGap::Full.native_pixels(), 192);
    }

    #[test]
    fn test_config_serialization() {
        let config = LayoutConfig {
            rotation: ScreenRotation::CounterClockwise,
            gap: ScreenGap::Half,
            integer_scale: true,
            ..Default::default()
        };
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: LayoutConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
