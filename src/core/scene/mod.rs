//=========================================================================
// Scene System
//=========================================================================
//
// Stack-based game states that own component lifetimes.
//
// Architecture:
// ```text
//   SceneManager
//     ├─ stack: Vec<SceneSlot { scene, archived components }>
//     └─ default: Option<SceneFactory>
//
//   push(B) over A:  registry ─► persistent ┐
//                             └► A's own ──► archived on A, A.suspend()
//                    B.initialize() ───────► registry = persistent + B's
//   pop()  over A:   B.popped(), registry = persistent + A's archived,
//                    A.resume()
// ```
//
// Only the top scene's components are live. Persistent components stay
// in the registry across every push and pop.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::component::ComponentRef;

//=== Module Declarations =================================================

mod scene_manager;

//=== Public API ==========================================================

pub use scene_manager::{SceneFactory, SceneManager};

//=== Scene Trait =========================================================

/// A game state with lifecycle hooks.
///
/// Only `initialize()` is required. Hooks default to doing nothing:
///
/// ```ignore
/// struct Title;
///
/// impl Scene for Title {
///     fn initialize(&mut self) -> Vec<ComponentRef> {
///         vec![Rc::new(RefCell::new(Camera::new()))]
///     }
/// }
/// ```
pub trait Scene {
    /// Name used in log messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Creates the scene's own components. Called once per push, before
    /// the scene goes live.
    fn initialize(&mut self) -> Vec<ComponentRef>;

    /// Called after the scene became the top of the stack.
    fn pushed(&mut self) {}

    /// Called after the scene was removed from the stack.
    fn popped(&mut self) {}

    /// Called when another scene is pushed over this one.
    fn suspend(&mut self) {}

    /// Called when this scene is the top again after a pop.
    fn resume(&mut self) {}
}
