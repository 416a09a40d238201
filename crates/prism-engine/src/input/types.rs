/// Keyboard key identifier.
///
/// Only keys the demo reacts to get their own variant. Everything else maps to
/// `Key::Unknown(u32)` with the platform code when one exists.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    F11,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// One keyboard transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// True when the event is an auto-repeat.
    pub repeat: bool,
}

/// What a key asks the runtime to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Action {
    ToggleFullscreen,
    Quit,
}

/// Maps a key transition to an [`Action`].
///
/// Actions fire on release only. Presses and auto-repeats are ignored.
pub fn action_for(ev: KeyEvent) -> Option<Action> {
    if ev.state != KeyState::Released || ev.repeat {
        return None;
    }
    match ev.key {
        Key::Escape => Some(Action::Quit),
        Key::F11 => Some(Action::ToggleFullscreen),
        Key::Unknown(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(key: Key, state: KeyState) -> KeyEvent {
        KeyEvent { key, state, repeat: false }
    }

    // ── release fires ─────────────────────────────────────────────────────

    #[test]
    fn escape_release_quits() {
        assert_eq!(action_for(ev(Key::Escape, KeyState::Released)), Some(Action::Quit));
    }

    #[test]
    fn f11_release_toggles_fullscreen() {
        assert_eq!(
            action_for(ev(Key::F11, KeyState::Released)),
            Some(Action::ToggleFullscreen)
        );
    }

    // ── everything else is ignored ────────────────────────────────────────

    #[test]
    fn presses_do_nothing() {
        assert_eq!(action_for(ev(Key::Escape, KeyState::Pressed)), None);
        assert_eq!(action_for(ev(Key::F11, KeyState::Pressed)), None);
    }

    #[test]
    fn repeats_do_nothing() {
        let e = KeyEvent { key: Key::F11, state: KeyState::Released, repeat: true };
        assert_eq!(action_for(e), None);
    }

    #[test]
    fn unknown_keys_do_nothing() {
        assert_eq!(action_for(ev(Key::Unknown(42), KeyState::Released)), None);
    }
}
