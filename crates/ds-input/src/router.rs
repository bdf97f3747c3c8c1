//! Forwards host input events to the core

use crate::keys::KeyState;
use crate::mapping::KeyBindings;
use ds_core::Core;
use ds_layout::{ScreenLayout, TouchPoint};

/// Routes key and pointer events from the host's input thread.
///
/// The router is the only writer of key and touch state. Events that
/// arrive while no core is running are dropped.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    bindings: KeyBindings,
    held: KeyState,
    touch: Option<TouchPoint>,
}

impl InputRouter {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: KeyState::default(),
            touch: None,
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    pub fn held(&self) -> KeyState {
        self.held
    }

    /// Last touch sent to the core, while the pointer is down
    pub fn touch(&self) -> Option<TouchPoint> {
        self.touch
    }

    /// Host key pressed. Returns whether it was bound to any button.
    pub fn key_down<C: Core + ?Sized>(&mut self, core: Option<&C>, host_key: &str) -> bool {
        let mut bound = false;
        for key in self.bindings.keys_for(host_key) {
            bound = true;
            if let Some(core) = core {
                if !self.held.is_held(key) {
                    core.press_key(key);
                    self.held.set_key(key, true);
                }
            }
        }
        bound
    }

    /// Host key released. Returns whether it was bound to any button.
    pub fn key_up<C: Core + ?Sized>(&mut self, core: Option<&C>, host_key: &str) -> bool {
        let mut bound = false;
        for key in self.bindings.keys_for(host_key) {
            bound = true;
            if self.held.is_held(key) {
                if let Some(core) = core {
                    core.release_key(key);
                }
                self.held.set_key(key, false);
            }
        }
        bound
    }

    /// Pointer pressed, or moved while pressed, at an output position
    pub fn pointer_down<C: Core + ?Sized>(
        &mut self,
        core: Option<&C>,
        layout: &ScreenLayout,
        x: i32,
        y: i32,
    ) -> Option<TouchPoint> {
        let core = core?;
        let point = layout.touch_point(x, y)?;
        core.touch(point.x, point.y);
        tracing::trace!("Touch at {},{} -> {:?}", x, y, point);
        self.touch = Some(point);
        Some(point)
    }

    /// Pointer released
    pub fn pointer_up<C: Core + ?Sized>(&mut self, core: Option<&C>) {
        if let Some(core) = core {
            core.release_touch();
        }
        self.touch = None;
    }

    /// Release everything held, e.g. when the window loses focus
    pub fn release_all<C: Core + ?Sized>(&mut self, core: Option<&C>) {
        if let Some(core) = core {
            for key in self.held.keys() {
                core.release_key(key);
            }
            if self.touch.is_some() {
                core.release_touch();
            }
        }
        self.held = KeyState::default();
        self.touch = None;
    }
}
