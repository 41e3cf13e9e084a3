//=========================================================================
// Force Fields
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec2;
use log::{error, trace};

//=== Internal Dependencies ===============================================

use crate::core::bounding::BoundingVolume;
use crate::core::component::{Component, Drawable, Priority, UpdateContext};
use crate::core::render::{Color, Surface};
use crate::core::time::GameTime;

//=== Force ===============================================================

/// Constant force over a world-space region.
///
/// Runs at [`Priority::High`] so accelerations are queued before the
/// bodies integrate in the same tick. Every other component whose body
/// accepts forces and whose world volume intersects `bounding` receives
/// `force / mass`. Bodies with zero mass are reported and skipped.
pub struct Force {
    pub bounding: BoundingVolume,
    pub force: Vec2,
    pub enabled: bool,
}

impl Force {
    pub fn new(bounding: BoundingVolume, force: Vec2) -> Self {
        Self {
            bounding,
            force,
            enabled: true,
        }
    }
}

impl Component for Force {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn update_order(&self) -> i32 {
        Priority::High.value()
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let mut affected = 0usize;

        for other in ctx.others() {
            let Ok(mut component) = other.try_borrow_mut() else {
                continue;
            };
            // Accelerations are drained only by an enabled integrator
            if !component.enabled() {
                continue;
            }
            let Some(body) = component.body_mut() else {
                continue;
            };
            if !body.accepts_forces() || !body.world_bounding().intersects(&self.bounding) {
                continue;
            }

            match body.apply_force(self.force) {
                Ok(()) => affected += 1,
                Err(e) => error!(target: "physics", "Skipping body: {}", e),
            }
        }

        trace!(target: "physics", "Force {:?} applied to {} bodies", self.force, affected);
    }

    fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
        Some(self)
    }
}

impl Drawable for Force {
    fn draw(&mut self, _time: &GameTime, surface: &mut dyn Surface) {
        self.bounding.stroke(surface, Color::BLUE);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
