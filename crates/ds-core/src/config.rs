//! Configuration system for the dsfront runtime

use crate::error::ConfigError;
use ds_layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub video: VideoConfig,
    pub layout: LayoutConfig,
    pub audio: AudioConfig,
    pub save: SaveConfig,
    pub paths: PathConfig,
    pub input: InputConfig,
    pub debug: DebugConfig,
}

/// General frontend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Skip the firmware menu and boot the cartridge directly
    pub direct_boot: bool,
    pub show_fps_counter: bool,
}

/// Video settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Render 3D at twice the native resolution
    pub high_res_3d: bool,
    /// Smooth filtering when the screens are scaled
    pub screen_filter: bool,
}

/// Audio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enable: bool,
    pub host_sample_rate: u32,
    /// Stereo frames per host buffer
    pub host_buffer_frames: u32,
    /// Rate the core produces samples at
    pub native_sample_rate: u32,
}

/// Save data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Period of the background save flush
    pub flush_interval_ms: u64,
}

/// Paths to system files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub bios7: PathBuf,
    pub bios9: PathBuf,
    pub firmware: PathBuf,
    pub gba_bios: PathBuf,
    pub sd_image: PathBuf,
}

/// Host key names bound to each emulated button
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub a: String,
    pub b: String,
    pub select: String,
    pub start: String,
    pub right: String,
    pub left: String,
    pub up: String,
    pub down: String,
    pub r: String,
    pub l: String,
    pub x: String,
    pub y: String,
}

/// Debug settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: LogLevel,
}

/// Logging level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            direct_boot: true,
            show_fps_counter: false,
        }
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            high_res_3d: false,
            screen_filter: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enable: true,
            host_sample_rate: 48000,
            host_buffer_frames: 1024,
            native_sample_rate: 32768,
        }
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            flush_interval_ms: 3000,
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dsfront");

        Self {
            bios7: base.join("bios7.bin"),
            bios9: base.join("bios9.bin"),
            firmware: base.join("firmware.bin"),
            gba_bios: base.join("gba_bios.bin"),
            sd_image: base.join("sd.img"),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            a: "L".to_string(),
            b: "K".to_string(),
            select: "G".to_string(),
            start: "H".to_string(),
            right: "D".to_string(),
            left: "A".to_string(),
            up: "W".to_string(),
            down: "S".to_string(),
            r: "P".to_string(),
            l: "Q".to_string(),
            x: "O".to_string(),
            y: "I".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, or create and save the
    /// defaults if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dsfront")
            .join("config.toml")
    }

    /// Save flush period as a duration
    pub fn flush_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.save.flush_interval_ms)
    }
}
