//! Interface to the emulated machine
//!
//! The emulator core itself lives outside this workspace. The runtime only
//! talks to it through [`Core`], and only creates it through [`CoreLoader`].

use crate::error::{BootError, SaveError};
use crate::frame::FrameBuffer;
use crate::sample::SampleBatch;
use std::fmt;
use std::path::PathBuf;

/// Cartridge slot holding a persistent save region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartridgeSlot {
    /// DS cartridge (slot 1)
    Nds,
    /// GBA cartridge (slot 2)
    Gba,
}

impl CartridgeSlot {
    pub const ALL: [CartridgeSlot; 2] = [CartridgeSlot::Nds, CartridgeSlot::Gba];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nds => "nds",
            Self::Gba => "gba",
        }
    }
}

impl fmt::Display for CartridgeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emulated buttons, in the core's key index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DsKey {
    A,
    B,
    Select,
    Start,
    Right,
    Left,
    Up,
    Down,
    R,
    L,
    X,
    Y,
}

impl DsKey {
    pub const COUNT: usize = 12;

    pub const ALL: [DsKey; Self::COUNT] = [
        DsKey::A,
        DsKey::B,
        DsKey::Select,
        DsKey::Start,
        DsKey::Right,
        DsKey::Left,
        DsKey::Up,
        DsKey::Down,
        DsKey::R,
        DsKey::L,
        DsKey::X,
        DsKey::Y,
    ];

    /// Index passed to the core's key notifications
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// ROM images a core is booted from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomSet {
    pub nds: Option<PathBuf>,
    pub gba: Option<PathBuf>,
}

impl RomSet {
    pub fn nds(path: impl Into<PathBuf>) -> Self {
        Self {
            nds: Some(path.into()),
            gba: None,
        }
    }

    pub fn gba(path: impl Into<PathBuf>) -> Self {
        Self {
            nds: None,
            gba: Some(path.into()),
        }
    }

    /// Nothing loaded: the core boots the firmware directly
    pub fn is_empty(&self) -> bool {
        self.nds.is_none() && self.gba.is_none()
    }
}

/// The emulated machine.
///
/// A single core is shared by the execution, audio and save workers plus the
/// host's presentation thread, so every method takes `&self`. Each channel
/// has one producer and one consumer: the execution worker drives
/// `run_frame`, the audio worker alone calls `request_samples`, the save
/// worker alone calls `flush_save`, and the presentation thread alone polls
/// frames and sends input.
pub trait Core: Send + Sync + 'static {
    /// Run the machine for one frame
    fn run_frame(&self);

    /// Copy the next frame into `buffer` if one is ready. Never blocks.
    fn poll_frame(&self, buffer: &mut FrameBuffer, crop: bool) -> bool;

    /// Produce `count` native-rate stereo samples
    fn request_samples(&self, count: usize) -> SampleBatch;

    /// Slots that currently hold a save region
    fn save_slots(&self) -> Vec<CartridgeSlot>;

    /// Persist a slot's save region. A no-op when unchanged; returns whether
    /// anything was written.
    fn flush_save(&self, slot: CartridgeSlot) -> Result<bool, SaveError>;

    /// Change a slot's save size. Destroys the current contents.
    fn resize_save(&self, slot: CartridgeSlot, size: usize) -> Result<(), SaveError>;

    fn press_key(&self, key: DsKey);

    fn release_key(&self, key: DsKey);

    /// Touch at a point in native touch-screen space
    fn touch(&self, x: u16, y: u16);

    fn release_touch(&self);

    /// Frames emulated during the last second, for a diagnostic overlay
    fn fps(&self) -> Option<u32> {
        None
    }

    /// Whether the machine is running a GBA cartridge in GBA mode
    fn is_gba_mode(&self) -> bool {
        false
    }
}

/// Constructs cores
pub trait CoreLoader {
    type Core: Core;

    fn boot(&self, roms: &RomSet) -> Result<Self::Core, BootError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_indices() {
        assert_eq!(DsKey::A.index(), 0);
        assert_eq!(DsKey::Y.index(), 11);
        for (i, key) in DsKey::ALL.iter().enumerate() {
            assert_eq!(DsKey::from_index(i), Some(*key));
        }
        assert_eq!(DsKey::from_index(12), None);
    }

    #[test]
    fn test_rom_set() {
        assert!(RomSet::default().is_empty());
        let roms = RomSet::nds("game.nds");
        assert!(!roms.is_empty());
        assert!(roms.gba.is_none());
    }
}
