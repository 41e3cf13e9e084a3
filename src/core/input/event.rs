//=========================================================================
// Key Events
//
// Platform-neutral keyboard events fed to the input manager.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓  crossbeam channel
//    InputEvent (this module)
//         ↓
//    StateTracker (held keys, press order)
//         ↓
//    KeyBindings → InputSnapshot (buttons, triggers, sticks, POV)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyW` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Numpad Keys ------------------------------------------------------

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,

    //--- Alphabetic Keys --------------------------------------------------

    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    ShiftLeft,
    ShiftRight,

    /// Fallback for keys the platform layer does not map.
    Unidentified,
}

//=== InputEvent ==========================================================

/// Discrete keyboard transition.
///
/// Auto-repeat is filtered by the platform layer; a duplicate `KeyDown`
/// for a held key is ignored by the tracker anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
}

impl InputEvent {
    pub fn key(&self) -> KeyCode {
        match *self {
            Self::KeyDown { key } | Self::KeyUp { key } => key,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Self::KeyDown { .. })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_exposes_key_and_direction() {
        let down = InputEvent::KeyDown { key: KeyCode::KeyW };
        let up = InputEvent::KeyUp { key: KeyCode::KeyW };

        assert_eq!(down.key(), KeyCode::KeyW);
        assert_eq!(up.key(), KeyCode::KeyW);
        assert!(down.is_down());
        assert!(!up.is_down());
        assert_ne!(down, up);
    }
}
