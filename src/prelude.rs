//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use arcade_runtime::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Scheduler
pub use crate::engine::{Game, GameBuilder, RunState};
pub use crate::core::error::{EngineError, PhysicsError};
pub use crate::core::time::{FrameClock, FrameSignal, GameTime, ManualClock, SystemClock, WallClock};

// Components
pub use crate::core::component::{Component, ComponentRef, Drawable, Priority, UpdateContext};

// Scenes
pub use crate::core::scene::{Scene, SceneFactory};

// Geometry and physics
pub use crate::core::bounding::{BoundingKind, BoundingVolume};
pub use crate::core::camera::{Camera, TrackingCamera};
pub use crate::core::physics::{
    Body, Collidable, Collider, CollisionManager, CollisionPairing, Force, Motion, PhysicsObject,
};

// Input
pub use crate::core::input::{
    Binding, Button, ButtonState, InputEvent, InputManager, KeyBindings, KeyCode, Pov, Stick, Trigger,
};

// Rendering and assets
pub use crate::core::asset::{AssetKind, AssetLoader, AssetRequest};
pub use crate::core::render::{Color, CommandBuffer, Surface};

// Platform
pub use crate::platform::{Platform, PlatformConfig, PlatformError};

// Math
pub use glam::{Affine2, Vec2};
