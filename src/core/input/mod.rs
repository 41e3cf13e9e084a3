//=========================================================================
// Input System
//
// Logical, gamepad-shaped input for gameplay code.
//
// Architecture:
// ```text
//   platform ──InputEvent──► channel ──► InputManager (component)
//                                          ├─ StateTracker (held keys)
//                                          ├─ KeyBindings (key → control)
//                                          └─ previous / current
//                                               InputSnapshot
// ```
//
// Gameplay components query the manager (or a copy of its snapshot)
// during their own update; the manager samples first in every tick.
//
//=========================================================================

//=== Module Declarations =================================================

mod bindings;
mod controls;
pub mod event;
mod input_manager;
mod state_tracker;

//=== Public API ==========================================================

pub use bindings::{Binding, KeyBindings};
pub use controls::{Button, ButtonState, InputSnapshot, Pov, Stick, Trigger};
pub use event::{InputEvent, KeyCode};
pub use input_manager::InputManager;
pub use state_tracker::StateTracker;
