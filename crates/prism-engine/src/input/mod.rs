//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events through [`platform`] and asks
//! [`action_for`] what, if anything, the key means.

mod types;

pub(crate) mod platform;

pub use types::{action_for, Action, Key, KeyEvent, KeyState};
