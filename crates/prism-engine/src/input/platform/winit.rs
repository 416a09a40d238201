use ::winit::event::{ElementState, KeyEvent as WinitKeyEvent};
use ::winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Key, KeyEvent, KeyState};

/// Translates a winit keyboard event into an engine [`KeyEvent`].
pub(crate) fn translate_key_event(event: &WinitKeyEvent) -> KeyEvent {
    KeyEvent {
        key: map_key(event.physical_key),
        state: map_state(event.state),
        repeat: event.repeat,
    }
}

fn map_state(st: ElementState) -> KeyState {
    match st {
        ElementState::Pressed => KeyState::Pressed,
        ElementState::Released => KeyState::Released,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(KeyCode::Escape) => Key::Escape,
        PhysicalKey::Code(KeyCode::F11) => Key::F11,
        PhysicalKey::Code(other) => Key::Unknown(other as u32),
        // winit 0.30 uses NativeKeyCode; no stable numeric is guaranteed here.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::winit::keyboard::NativeKeyCode;

    #[test]
    fn maps_keys_the_demo_uses() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F11)), Key::F11);
    }

    #[test]
    fn other_keys_are_unknown() {
        assert!(matches!(map_key(PhysicalKey::Code(KeyCode::KeyA)), Key::Unknown(_)));
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            Key::Unknown(0)
        );
    }

    #[test]
    fn maps_element_state() {
        assert_eq!(map_state(ElementState::Pressed), KeyState::Pressed);
        assert_eq!(map_state(ElementState::Released), KeyState::Released);
    }
}
