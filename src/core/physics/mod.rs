//=========================================================================
// Physics
//=========================================================================
//
// First-order motion chain, one stage per priority band:
//
// ```text
//   Force            (High)    accelerations += force / mass
//   PhysicsObject    (Medium)  velocity += Σ accelerations · dt
//                              accelerations.clear()
//                              position += velocity · dt
// ```
//
// `dt` is the fixed simulated step in seconds. Bounding volumes on a
// body are body-local and are placed in the world by `position`.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;

//=== Internal Dependencies ===============================================

use crate::core::bounding::BoundingVolume;
use crate::core::component::{Component, Drawable, UpdateContext};
use crate::core::error::PhysicsError;
use crate::core::render::{Color, Surface};
use crate::core::time::GameTime;

//=== Module Declarations =================================================

mod collision;
mod force;

//=== Public API ==========================================================

pub use collision::{Collidable, Collider, CollisionManager, CollisionPairing};
pub use force::Force;

//=== Motion ==============================================================

/// Which stages of the chain a body takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    /// Never moves.
    Static,

    /// Moves with a constant velocity; ignores forces.
    Velocity,

    /// Accumulates forces into velocity.
    #[default]
    Accelerated,
}

//=== Body ================================================================

/// Kinematic state of a physics object.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub mass: f32,
    /// Body-local volume; see [`Body::world_bounding`].
    pub bounding: BoundingVolume,
    pub position: Vec2,
    pub velocity: Vec2,
    pub motion: Motion,
    accelerations: Vec<Vec2>,
}

impl Body {
    //--- Construction -----------------------------------------------------

    /// Unit-mass body at the origin with no volume.
    pub fn new(motion: Motion) -> Self {
        Self {
            mass: 1.0,
            bounding: BoundingVolume::None,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            motion,
            accelerations: Vec::new(),
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_bounding(mut self, bounding: BoundingVolume) -> Self {
        self.bounding = bounding;
        self
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn accepts_forces(&self) -> bool {
        self.motion == Motion::Accelerated
    }

    /// Accelerations accumulated since the last integration.
    pub fn accelerations(&self) -> &[Vec2] {
        &self.accelerations
    }

    pub fn world_bounding(&self) -> BoundingVolume {
        self.bounding.translated(self.position)
    }

    //--- Simulation -------------------------------------------------------

    /// Queues `force / mass` for the next integration.
    pub fn apply_force(&mut self, force: Vec2) -> Result<(), PhysicsError> {
        if self.mass == 0.0 {
            return Err(PhysicsError::ZeroMass { force });
        }
        if !self.mass.is_finite() {
            return Err(PhysicsError::NonFiniteMass { force, mass: self.mass });
        }
        self.accelerations.push(force / self.mass);
        Ok(())
    }

    /// Advances the body by `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        match self.motion {
            Motion::Static => {}
            Motion::Velocity => {
                self.position += self.velocity * dt;
            }
            Motion::Accelerated => {
                let total: Vec2 = self.accelerations.drain(..).sum();
                self.velocity += total * dt;
                self.position += self.velocity * dt;
            }
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Motion::default())
    }
}

//=== PhysicsObject =======================================================

/// Ready-made component around a [`Body`]: integrates every tick and
/// strokes its world volume.
pub struct PhysicsObject {
    pub body: Body,
    pub color: Color,
    pub enabled: bool,
    pub persistent: bool,
}

impl PhysicsObject {
    pub fn new(body: Body) -> Self {
        Self {
            body,
            color: Color::RED,
            enabled: true,
            persistent: false,
        }
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }
}

impl Component for PhysicsObject {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn is_persistent(&self) -> bool {
        self.persistent
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.body.integrate(ctx.time().elapsed_secs());
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }

    fn body(&self) -> Option<&Body> {
        Some(&self.body)
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        Some(&mut self.body)
    }
}

impl Drawable for PhysicsObject {
    fn draw(&mut self, _time: &GameTime, surface: &mut dyn Surface) {
        self.body.world_bounding().stroke(surface, self.color);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
