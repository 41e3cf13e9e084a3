//=========================================================================
// Components
//=========================================================================
//
// Polymorphic participants of the update and draw passes.
//
// Architecture:
// ```text
//   ComponentRef = Rc<RefCell<dyn Component>>
//
//   Component            enabled / update_order / draw_order / persistent
//     ├─ update(ctx)     update pass, ascending update_order
//     └─ capabilities    opt-in views, `None` by default
//          ├─ as_drawable_mut()    draw pass, ascending draw_order
//          ├─ as_collidable_mut()  collision pass
//          └─ body() / body_mut()  force application, camera tracking
// ```
//
// Capabilities are composed rather than inherited: a component exposes
// only the views it actually implements.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use crate::core::physics::{Body, Collidable};
use crate::core::render::Surface;
use crate::core::time::GameTime;

//=== Module Declarations =================================================

mod context;
mod registry;

//=== Public API ==========================================================

pub use context::UpdateContext;
pub use registry::Registry;

/// Shared handle to a registered component.
pub type ComponentRef = Rc<RefCell<dyn Component>>;

//=== Priority ============================================================

/// Named order levels. Lower values run earlier in a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    SuperHigh,
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
    SuperLow,
}

impl Priority {
    pub const fn value(self) -> i32 {
        match self {
            Self::SuperHigh => -1000,
            Self::VeryHigh => -100,
            Self::High => -10,
            Self::Medium => 0,
            Self::Low => 10,
            Self::VeryLow => 100,
            Self::SuperLow => 1000,
        }
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

//=== ComponentId =========================================================

/// Identity of a registered component, derived from its allocation.
///
/// Stable for as long as any [`ComponentRef`] to the component is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    pub fn of(component: &ComponentRef) -> Self {
        Self(Rc::as_ptr(component) as *const () as usize)
    }
}

/// Identity comparison of two handles (ignores vtable differences).
pub fn same_component(a: &ComponentRef, b: &ComponentRef) -> bool {
    ComponentId::of(a) == ComponentId::of(b)
}

//=== Component Trait =====================================================

/// A scheduled participant of the game loop.
///
/// Only the pieces a component needs have to be overridden; every method
/// has a neutral default.
///
/// ```ignore
/// struct Blinker { visible: bool }
///
/// impl Component for Blinker {
///     fn update(&mut self, _ctx: &mut UpdateContext<'_>) {
///         self.visible = !self.visible;
///     }
/// }
/// ```
pub trait Component {
    /// Disabled components are skipped by the update pass.
    fn enabled(&self) -> bool {
        true
    }

    fn update_order(&self) -> i32 {
        Priority::Medium.value()
    }

    fn draw_order(&self) -> i32 {
        Priority::Medium.value()
    }

    /// Persistent components survive scene pushes and pops.
    fn is_persistent(&self) -> bool {
        false
    }

    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}

    //--- Capabilities -----------------------------------------------------

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        None
    }

    fn as_collidable_mut(&mut self) -> Option<&mut dyn Collidable> {
        None
    }

    fn body(&self) -> Option<&Body> {
        None
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        None
    }
}

//=== Drawable Trait ======================================================

/// Draw-pass capability.
///
/// Called between a `push_transform(view)` / `pop_transform()` pair, so
/// coordinates are world space.
pub trait Drawable {
    fn draw(&mut self, time: &GameTime, surface: &mut dyn Surface);
}

//=========================================================================
// Unit Tests
//=========================================================================
