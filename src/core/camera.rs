//=========================================================================
// Cameras
//=========================================================================
//
// Components that produce the view transform for the draw pass.
//
//   Camera          view = translation(position)
//   TrackingCamera  follows a body with a dead zone and a lag factor,
//                   then installs the view like a plain camera
//
// Both run at `SuperHigh` so the view is in place before any other
// update reads it.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::component::{Component, ComponentRef, Priority, UpdateContext};

//=== Camera ==============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec2,
    pub enabled: bool,
    pub persistent: bool,
}

impl Camera {
    pub fn new() -> Self {
        Self::at(Vec2::ZERO)
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            enabled: true,
            persistent: false,
        }
    }

    /// Translation by `position`.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_translation(self.position)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Camera {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn update_order(&self) -> i32 {
        Priority::SuperHigh.value()
    }

    fn is_persistent(&self) -> bool {
        self.persistent
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        ctx.set_view_transform(self.transform());
    }
}

//=== TrackingCamera ======================================================

/// Camera that chases `target`'s body position.
///
/// Each tick, per axis: the distance to `target + offset` is reduced by
/// `margin` toward zero (zero inside the margin), multiplied by `factor`
/// and used as the camera velocity for that tick.
pub struct TrackingCamera {
    pub camera: Camera,
    pub target: ComponentRef,
    pub offset: Vec2,
    pub margin: Vec2,
    pub factor: Vec2,
    velocity: Vec2,
}

impl TrackingCamera {
    pub fn new(target: ComponentRef) -> Self {
        Self {
            camera: Camera::new(),
            target,
            offset: Vec2::ZERO,
            margin: Vec2::ZERO,
            factor: Vec2::ONE,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_margin(mut self, margin: Vec2) -> Self {
        self.margin = margin.abs();
        self
    }

    pub fn with_factor(mut self, factor: Vec2) -> Self {
        self.factor = factor;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.camera.position
    }

    /// Velocity applied during the last update.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn target_position(&self) -> Option<Vec2> {
        match self.target.try_borrow() {
            Ok(target) => target.body().map(|body| body.position),
            Err(_) => {
                warn!(target: "camera", "Tracking target is busy, holding position");
                None
            }
        }
    }
}

/// Shrinks `delta` toward zero by `margin`, clamping at zero.
///
/// Inside the margin the result is exactly zero, so the camera holds still
/// instead of drifting toward the target.
fn dead_zone(delta: f32, margin: f32) -> f32 {
    if delta.abs() <= margin {
        0.0
    } else {
        delta - margin.copysign(delta)
    }
}

impl Component for TrackingCamera {
    fn enabled(&self) -> bool {
        self.camera.enabled
    }

    fn update_order(&self) -> i32 {
        self.camera.update_order()
    }

    fn is_persistent(&self) -> bool {
        self.camera.persistent
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.velocity = match self.target_position() {
            Some(target) => {
                let delta = target + self.offset - self.camera.position;
                let remainder = Vec2::new(
                    dead_zone(delta.x, self.margin.x),
                    dead_zone(delta.y, self.margin.y),
                );
                remainder * self.factor
            }
            None => Vec2::ZERO,
        };

        self.camera.position += self.velocity * ctx.time().elapsed_secs();
        self.camera.update(ctx);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command_queue::CommandQueue;
    use crate::core::physics::{Body, Motion, PhysicsObject};
    use crate::core::time::GameTime;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    //--- Test Helpers -----------------------------------------------------

    fn step(component: &mut dyn Component, dt: Duration) -> Affine2 {
        let time = GameTime::new(dt, dt, dt);
        let mut view = Affine2::IDENTITY;
        let mut commands = CommandQueue::new();
        let mut ctx = UpdateContext::new(&time, &[], &mut view, &mut commands);
        component.update(&mut ctx);
        view
    }

    fn target_at(position: Vec2) -> Rc<RefCell<PhysicsObject>> {
        Rc::new(RefCell::new(PhysicsObject::new(
            Body::new(Motion::Static).with_position(position),
        )))
    }

    //=====================================================================
    // Camera
    //=====================================================================

    #[test]
    fn camera_installs_translation_of_position() {
        let mut camera = Camera::at(Vec2::new(3.0, -4.0));
        let view = step(&mut camera, Duration::from_millis(16));
        assert_eq!(view.transform_point2(Vec2::ZERO), Vec2::new(3.0, -4.0));
        assert_eq!(camera.update_order(), -1000);
    }

    //=====================================================================
    // TrackingCamera
    //=====================================================================

    #[test]
    fn dead_zone_is_signed_and_clamped() {
        assert_eq!(dead_zone(5.0, 2.0), 3.0);
        assert_eq!(dead_zone(-5.0, 2.0), -3.0);
        assert_eq!(dead_zone(1.5, 2.0), 0.0);
        assert_eq!(dead_zone(-1.5, 2.0), 0.0);
    }

    #[test]
    fn tracks_target_outside_margin() {
        let target = target_at(Vec2::new(10.0, 0.0));
        let mut camera = TrackingCamera::new(target.clone())
            .with_margin(Vec2::new(2.0, 2.0))
            .with_factor(Vec2::new(0.5, 0.5));

        let view = step(&mut camera, Duration::from_secs(1));

        // (10 - 2) * 0.5 = 4 units/s for one second
        assert_eq!(camera.velocity(), Vec2::new(4.0, 0.0));
        assert_eq!(camera.position(), Vec2::new(4.0, 0.0));
        assert_eq!(view.translation, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn holds_still_inside_margin() {
        let target = target_at(Vec2::new(1.0, -1.5));
        let mut camera = TrackingCamera::new(target).with_margin(Vec2::new(2.0, 2.0));

        step(&mut camera, Duration::from_secs(1));

        assert_eq!(camera.position(), Vec2::ZERO);
    }

    #[test]
    fn offset_shifts_the_goal() {
        let target = target_at(Vec2::ZERO);
        let mut camera = TrackingCamera::new(target).with_offset(Vec2::new(0.0, 8.0));

        step(&mut camera, Duration::from_millis(500));

        // factor 1: velocity (0, 8), half a second
        assert_eq!(camera.position(), Vec2::new(0.0, 4.0));
    }

    #[test]
    fn busy_target_holds_position() {
        let target = target_at(Vec2::new(10.0, 0.0));
        let mut camera = TrackingCamera::new(target.clone());

        let _guard = target.borrow_mut();
        step(&mut camera, Duration::from_secs(1));

        assert_eq!(camera.position(), Vec2::ZERO);
    }
}
