//! Save flushing against real files

use ds_core::{
    CartridgeSlot, Core, DsKey, FrameBuffer, RunToken, SampleBatch, SaveError,
};
use ds_save::{SaveFile, SaveFlusher, WakeSignal};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Core with one DS save and a counter of disk writes
struct SavingCore {
    save: Mutex<SaveFile>,
    writes: AtomicUsize,
}

impl SavingCore {
    fn new(path: &Path) -> Self {
        Self {
            save: Mutex::new(SaveFile::open(path, 16).unwrap()),
            writes: AtomicUsize::new(0),
        }
    }

    fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Core for SavingCore {
    fn run_frame(&self) {}

    fn poll_frame(&self, _buffer: &mut FrameBuffer, _crop: bool) -> bool {
        false
    }

    fn request_samples(&self, count: usize) -> SampleBatch {
        vec![Default::default(); count]
    }

    fn save_slots(&self) -> Vec<CartridgeSlot> {
        vec![CartridgeSlot::Nds]
    }

    fn flush_save(&self, slot: CartridgeSlot) -> Result<bool, SaveError> {
        if slot != CartridgeSlot::Nds {
            return Err(SaveError::NoSlot(slot.name()));
        }
        let written = self.save.lock().flush()?;
        if written {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(written)
    }

    fn resize_save(&self, _slot: CartridgeSlot, size: usize) -> Result<(), SaveError> {
        self.save.lock().resize(size);
        Ok(())
    }

    fn press_key(&self, _key: DsKey) {}
    fn release_key(&self, _key: DsKey) {}
    fn touch(&self, _x: u16, _y: u16) {}
    fn release_touch(&self) {}
}

#[test]
fn test_double_flush_writes_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");

    let mut save = SaveFile::open(&path, 8).unwrap();
    save.write(0, &[1, 2, 3]);

    assert!(save.flush().unwrap());
    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

    assert!(!save.flush().unwrap());
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
    assert_eq!(std::fs::read(&path).unwrap(), [1, 2, 3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_open_existing_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");
    std::fs::write(&path, [9u8; 32]).unwrap();

    let save = SaveFile::open(&path, 8).unwrap();
    assert_eq!(save.len(), 32);
    assert!(!save.is_dirty());
}

#[test]
fn test_failed_flush_stays_dirty() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes the write fail
    let path = dir.path().join("blocked");
    std::fs::create_dir(&path).unwrap();

    let mut save = SaveFile::from_bytes(&path, vec![0; 4]);
    save.write_byte(0, 1);
    assert!(matches!(save.flush(), Err(SaveError::Write { .. })));
    assert!(save.is_dirty());
}

#[test]
fn test_flush_all_skips_clean_saves() {
    let dir = tempfile::tempdir().unwrap();
    let core = Arc::new(SavingCore::new(&dir.path().join("game.sav")));
    let flusher = SaveFlusher::new(Arc::clone(&core), RunToken::new(), WakeSignal::new());

    assert_eq!(flusher.flush_all(), 0);
    core.save.lock().write_byte(3, 0x42);
    assert_eq!(flusher.flush_all(), 1);
    assert_eq!(flusher.flush_all(), 0);
    assert_eq!(core.writes(), 1);
}

#[test]
fn test_periodic_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");
    let core = Arc::new(SavingCore::new(&path));
    let token = RunToken::new();
    let signal = WakeSignal::new();
    token.start();

    let handle = SaveFlusher::new(Arc::clone(&core), token.clone(), signal.clone())
        .with_interval(Duration::from_millis(10))
        .spawn()
        .unwrap();

    core.save.lock().write_byte(0, 7);
    let deadline = Instant::now() + Duration::from_secs(5);
    while core.writes() == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(core.writes(), 1);
    assert_eq!(std::fs::read(&path).unwrap()[0], 7);

    token.stop();
    signal.raise();
    handle.join().unwrap();
}

#[test]
fn test_shutdown_flushes_without_waiting() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.sav");
    let core = Arc::new(SavingCore::new(&path));
    let token = RunToken::new();
    let signal = WakeSignal::new();
    token.start();

    let handle = SaveFlusher::new(Arc::clone(&core), token.clone(), signal.clone())
        .with_interval(Duration::from_secs(60))
        .spawn()
        .unwrap();

    // Written after the worker went to sleep, before shutdown
    std::thread::sleep(Duration::from_millis(20));
    core.save.lock().write(0, &[5, 6]);

    let start = Instant::now();
    token.stop();
    signal.raise();
    handle.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(core.writes(), 1);
    assert_eq!(&std::fs::read(&path).unwrap()[..2], &[5, 6]);
}
