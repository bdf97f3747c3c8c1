//! Input routing against a recording core

use ds_core::{CartridgeSlot, Core, DsKey, FrameBuffer, SampleBatch, SaveError};
use ds_input::{InputRouter, KeyBindings};
use ds_layout::{LayoutConfig, ScreenLayout, ScreenRotation};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Press(DsKey),
    Release(DsKey),
    Touch(u16, u16),
    ReleaseTouch,
}

#[derive(Default)]
struct RecordingCore {
    events: Mutex<Vec<Event>>,
}

impl RecordingCore {
    fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl Core for RecordingCore {
    fn run_frame(&self) {}

    fn poll_frame(&self, _buffer: &mut FrameBuffer, _crop: bool) -> bool {
        false
    }

    fn request_samples(&self, count: usize) -> SampleBatch {
        vec![Default::default(); count]
    }

    fn save_slots(&self) -> Vec<CartridgeSlot> {
        Vec::new()
    }

    fn flush_save(&self, _slot: CartridgeSlot) -> Result<bool, SaveError> {
        Ok(false)
    }

    fn resize_save(&self, _slot: CartridgeSlot, _size: usize) -> Result<(), SaveError> {
        Ok(())
    }

    fn press_key(&self, key: DsKey) {
        self.push(Event::Press(key));
    }

    fn release_key(&self, key: DsKey) {
        self.push(Event::Release(key));
    }

    fn touch(&self, x: u16, y: u16) {
        self.push(Event::Touch(x, y));
    }

    fn release_touch(&self) {
        self.push(Event::ReleaseTouch);
    }
}

#[test]
fn test_key_press_and_release() {
    let core = RecordingCore::default();
    let mut router = InputRouter::new(KeyBindings::default());

    assert!(router.key_down(Some(&core), "H"));
    assert!(router.key_down(Some(&core), "H"));
    assert!(!router.key_down(Some(&core), "F1"));
    assert!(router.held().is_held(DsKey::Start));
    assert!(router.key_up(Some(&core), "h"));

    assert_eq!(
        core.events(),
        vec![Event::Press(DsKey::Start), Event::Release(DsKey::Start)]
    );
    assert!(router.held().is_empty());
}

#[test]
fn test_touch_maps_through_layout() {
    let core = RecordingCore::default();
    let mut router = InputRouter::default();
    let layout = ScreenLayout::compute(256, 384, &LayoutConfig::default(), false);
    let bottom = layout.bottom;

    let point = router
        .pointer_down(Some(&core), &layout, bottom.x as i32 + 128, bottom.y as i32 + 96)
        .unwrap();
    assert_eq!((point.x, point.y), (128, 96));

    // Far outside the touch screen clamps to its corner
    router.pointer_down(Some(&core), &layout, 10_000, 10_000);
    router.pointer_up(Some(&core));

    assert_eq!(
        core.events(),
        vec![Event::Touch(128, 96), Event::Touch(255, 191), Event::ReleaseTouch]
    );
    assert_eq!(router.touch(), None);
}

#[test]
fn test_rotated_touch_stays_in_bounds() {
    let core = RecordingCore::default();
    let mut router = InputRouter::default();
    let config = LayoutConfig {
        rotation: ScreenRotation::Clockwise,
        ..Default::default()
    };
    let layout = ScreenLayout::compute(800, 600, &config, false);

    for (x, y) in [(-50, -50), (0, 0), (400, 300), (799, 599), (5000, 5000)] {
        let point = router.pointer_down(Some(&core), &layout, x, y).unwrap();
        assert!(point.x < 256 && point.y < 192);
    }
}

#[test]
fn test_input_ignored_without_core() {
    let mut router = InputRouter::default();
    let layout = ScreenLayout::compute(256, 384, &LayoutConfig::default(), false);
    let none: Option<&RecordingCore> = None;

    assert!(router.key_down(none, "L"));
    assert!(router.held().is_empty());
    assert_eq!(router.pointer_down(none, &layout, 128, 300), None);
}

#[test]
fn test_no_touch_in_cropped_mode() {
    let core = RecordingCore::default();
    let mut router = InputRouter::default();
    let layout = ScreenLayout::compute(480, 320, &LayoutConfig::default(), true);

    assert_eq!(router.pointer_down(Some(&core), &layout, 100, 100), None);
    assert!(core.events().is_empty());
}

#[test]
fn test_release_all() {
    let core = RecordingCore::default();
    let mut router = InputRouter::default();
    let layout = ScreenLayout::compute(256, 384, &LayoutConfig::default(), false);

    router.key_down(Some(&core), "W");
    router.key_down(Some(&core), "L");
    router.pointer_down(Some(&core), &layout, 10, 200);
    router.release_all(Some(&core));

    let events = core.events();
    assert_eq!(
        &events[3..],
        &[Event::Release(DsKey::A), Event::Release(DsKey::Up), Event::ReleaseTouch]
    );
    assert!(router.held().is_empty());
}
