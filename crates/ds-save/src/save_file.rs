//! In-memory cartridge save backed by a file

use ds_core::SaveError;
use std::path::{Path, PathBuf};

/// Value of erased save memory
pub const ERASED: u8 = 0xFF;

/// Raw save bytes for one cartridge slot.
///
/// Writes only touch memory and mark the save dirty; [`SaveFile::flush`]
/// persists them.
#[derive(Debug, Clone)]
pub struct SaveFile {
    path: PathBuf,
    data: Vec<u8>,
    dirty: bool,
}

impl SaveFile {
    /// Load the save at `path`, or start an erased save of `default_size`
    /// bytes if no file exists yet
    pub fn open(path: impl Into<PathBuf>, default_size: usize) -> Result<Self, SaveError> {
        let path = path.into();

        let data = match std::fs::read(&path) {
            Ok(data) => {
                tracing::info!("Loaded save {:?} ({} bytes)", path, data.len());
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No save at {:?}, starting with {} bytes", path, default_size);
                vec![ERASED; default_size]
            }
            Err(source) => return Err(SaveError::Read { path, source }),
        };

        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    /// Wrap existing bytes without touching the disk
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            data,
            dirty: false,
        }
    }

    /// Save path conventionally used for a ROM: the ROM path with a `.sav`
    /// extension
    pub fn path_for_rom(rom: &Path) -> PathBuf {
        rom.with_extension("sav")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether there are changes not yet flushed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read a byte; out of range reads return erased memory
    pub fn read_byte(&self, address: usize) -> u8 {
        self.data.get(address).copied().unwrap_or(ERASED)
    }

    /// Write a byte; out of range writes are ignored
    pub fn write_byte(&mut self, address: usize, value: u8) {
        if let Some(byte) = self.data.get_mut(address) {
            if *byte != value {
                *byte = value;
                self.dirty = true;
            }
        }
    }

    /// Write a run of bytes, truncated to the save size
    pub fn write(&mut self, offset: usize, bytes: &[u8]) {
        for (i, &value) in bytes.iter().enumerate() {
            self.write_byte(offset + i, value);
        }
    }

    /// Persist the save if it changed since the last flush.
    ///
    /// Returns whether a write happened. A failed write leaves the save
    /// dirty so the next flush retries it.
    pub fn flush(&mut self) -> Result<bool, SaveError> {
        if !self.dirty {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SaveError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        std::fs::write(&self.path, &self.data).map_err(|source| SaveError::Write {
            path: self.path.clone(),
            source,
        })?;

        self.dirty = false;
        tracing::debug!("Wrote save {:?} ({} bytes)", self.path, self.data.len());
        Ok(true)
    }

    /// Change the save size, erasing its contents.
    ///
    /// Only meant for an explicit change of save type.
    pub fn resize(&mut self, size: usize) {
        tracing::info!("Resizing save {:?}: {} -> {} bytes", self.path, self.data.len(), size);
        self.data = vec![ERASED; size];
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_mark_dirty() {
        let mut save = SaveFile::from_bytes("game.sav", vec![0; 4]);
        assert!(!save.is_dirty());

        save.write_byte(1, 0);
        assert!(!save.is_dirty());

        save.write(2, &[1, 2, 3]);
        assert!(save.is_dirty());
        assert_eq!(save.data(), &[0, 0, 1, 2]);
        assert_eq!(save.read_byte(9), ERASED);
    }

    #[test]
    fn test_resize_erases() {
        let mut save = SaveFile::from_bytes("game.sav", vec![0; 4]);
        save.resize(8);
        assert_eq!(save.len(), 8);
        assert!(save.data().iter().all(|&b| b == ERASED));
        assert!(save.is_dirty());
    }

    #[test]
    fn test_path_for_rom() {
        let path = SaveFile::path_for_rom(Path::new("/roms/game.nds"));
        assert_eq!(path, PathBuf::from("/roms/game.sav"));
    }
}
