//=========================================================================
// Key Bindings
//=========================================================================
//
// Maps physical keys to logical controls.
//
// Architecture:
//   KeyCode → HashMap → Binding (button / trigger / stick direction / POV)
//
// The table starts empty; games install their own layout. Several keys
// may drive the same control (e.g. WASD and the arrows on one stick).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::Vec2;

//=== Internal Dependencies ===============================================

use super::controls::{Button, Pov, Stick, Trigger};
use super::event::KeyCode;

//=== Binding =============================================================

/// Logical control driven by a key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Button(Button),

    /// Full travel while the key is held.
    Trigger(Trigger),

    /// Adds `direction` to the stick while the key is held.
    Stick { stick: Stick, direction: Vec2 },

    /// Sets the hat while the key is the most recently pressed POV key.
    Pov(Pov),
}

//=== KeyBindings =========================================================

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyCode, Binding>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Binding API ------------------------------------------------------

    /// Binds a key, returning the binding it replaced.
    pub fn bind(&mut self, key: KeyCode, binding: Binding) -> Option<Binding> {
        self.bindings.insert(key, binding)
    }

    /// Fluent variant of [`KeyBindings::bind`].
    pub fn with(mut self, key: KeyCode, binding: Binding) -> Self {
        self.bind(key, binding);
        self
    }

    /// Binds four keys to the cardinal directions of a stick.
    pub fn bind_stick(
        &mut self,
        stick: Stick,
        [up, left, down, right]: [KeyCode; 4],
    ) {
        self.bind(up, Binding::Stick { stick, direction: Vec2::Y });
        self.bind(left, Binding::Stick { stick, direction: Vec2::NEG_X });
        self.bind(down, Binding::Stick { stick, direction: Vec2::NEG_Y });
        self.bind(right, Binding::Stick { stick, direction: Vec2::X });
    }

    pub fn unbind(&mut self, key: KeyCode) -> Option<Binding> {
        self.bindings.remove(&key)
    }

    /// Removes every key bound to `button`.
    pub fn unbind_button(&mut self, button: Button) {
        self.bindings.retain(|_, binding| *binding != Binding::Button(button));
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    //--- Lookup -----------------------------------------------------------

    pub fn resolve(&self, key: KeyCode) -> Option<Binding> {
        self.bindings.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
