//! Input handling for the dsfront runtime
//!
//! Translates host key names into emulated buttons and host pointer
//! positions into touch-screen coordinates, and forwards both to the core.

pub mod keys;
pub mod mapping;
pub mod router;

pub use keys::KeyState;
pub use mapping::KeyBindings;
pub use router::InputRouter;
