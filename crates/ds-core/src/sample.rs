//! Audio sample types

/// One stereo frame of signed 16-bit audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StereoSample {
    pub left: i16,
    pub right: i16,
}

impl StereoSample {
    pub const SILENCE: Self = Self { left: 0, right: 0 };

    pub fn new(left: i16, right: i16) -> Self {
        Self { left, right }
    }

    /// Unpack the core's native format: left in the low half, right in the high half
    pub fn from_packed(packed: u32) -> Self {
        Self {
            left: packed as u16 as i16,
            right: (packed >> 16) as u16 as i16,
        }
    }

    pub fn to_packed(self) -> u32 {
        (self.left as u16 as u32) | ((self.right as u16 as u32) << 16)
    }
}

/// A batch of native-rate samples handed from the core to the resampler
pub type SampleBatch = Vec<StereoSample>;
