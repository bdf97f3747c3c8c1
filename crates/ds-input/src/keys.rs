//! Held button state

use bitflags::bitflags;
use ds_core::DsKey;

bitflags! {
    /// Emulated buttons currently held, one bit per key index
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KeyState: u16 {
        const A      = 1 << 0;
        const B      = 1 << 1;
        const SELECT = 1 << 2;
        const START  = 1 << 3;
        const RIGHT  = 1 << 4;
        const LEFT   = 1 << 5;
        const UP     = 1 << 6;
        const DOWN   = 1 << 7;
        const R      = 1 << 8;
        const L      = 1 << 9;
        const X      = 1 << 10;
        const Y      = 1 << 11;
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::empty()
    }
}

impl KeyState {
    pub fn from_key(key: DsKey) -> Self {
        Self::from_bits_truncate(1 << key.index())
    }

    pub fn is_held(&self, key: DsKey) -> bool {
        self.contains(Self::from_key(key))
    }

    pub fn set_key(&mut self, key: DsKey, held: bool) {
        self.set(Self::from_key(key), held);
    }

    /// Held keys in index order
    pub fn keys(&self) -> impl Iterator<Item = DsKey> + '_ {
        DsKey::ALL.into_iter().filter(|&key| self.is_held(key))
    }
}
