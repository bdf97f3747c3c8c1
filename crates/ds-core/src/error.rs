//! Error types for the dsfront runtime

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the frontend
#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("Boot error: {0}")]
    Boot(#[from] BootError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No core is loaded")]
    NoCore,
}

/// Core construction failures.
///
/// This set is closed: a core either boots or fails for one of these reasons.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootError {
    #[error("BIOS files are missing or invalid")]
    BiosMissing,

    #[error("Firmware is not bootable")]
    FirmwareUnbootable,

    #[error("ROM cartridge could not be read")]
    RomUnreadable,
}

impl BootError {
    /// Short title for an error dialog
    pub fn title(&self) -> &'static str {
        match self {
            Self::BiosMissing => "Error Loading BIOS",
            Self::FirmwareUnbootable => "Error Loading Firmware",
            Self::RomUnreadable => "Error Loading ROM",
        }
    }

    /// What the user can do about it
    pub fn hint(&self) -> &'static str {
        match self {
            Self::BiosMissing => {
                "Make sure the path settings point to valid BIOS files and try again."
            }
            Self::FirmwareUnbootable => {
                "Make sure the path settings point to a bootable firmware file or try another boot method."
            }
            Self::RomUnreadable => "Make sure the ROM file is accessible and try again.",
        }
    }

    /// Numeric code used by embedders that pass errors across an FFI boundary
    pub fn code(&self) -> i32 {
        match self {
            Self::BiosMissing => 1,
            Self::FirmwareUnbootable => 2,
            Self::RomUnreadable => 3,
        }
    }
}

/// Audio output errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("No output device available")]
    NoDevice,

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Output disconnected")]
    Disconnected,
}

/// Save data errors
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to write save file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read save file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No save region in slot {0}")]
    NoSlot(&'static str),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for frontend operations
pub type Result<T> = std::result::Result<T, FrontendError>;
