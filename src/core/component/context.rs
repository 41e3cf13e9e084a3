//=========================================================================
// Update Context
//=========================================================================
//
// Everything a component may see or request during its `update` call:
//
//   time          read-only clocks for this tick
//   components    the pass snapshot (including disabled components)
//   view          draw-pass transform, written by cameras
//   commands      deferred mutations, applied at the tick boundary
//
// The component being updated is mutably borrowed for the duration of
// the call; `others()` skips it so peers can be borrowed safely.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Affine2;

//=== Internal Dependencies ===============================================

use super::{ComponentId, ComponentRef};
use crate::core::command_queue::{Command, CommandQueue};
use crate::core::scene::Scene;
use crate::core::time::GameTime;

//=== UpdateContext =======================================================

pub struct UpdateContext<'a> {
    time: &'a GameTime,
    components: &'a [ComponentRef],
    current: Option<ComponentId>,
    view: &'a mut Affine2,
    commands: &'a mut CommandQueue,
}

impl<'a> UpdateContext<'a> {
    //--- Construction -----------------------------------------------------

    /// Builds a context over an explicit snapshot. The game does this once
    /// per component per tick; tests use it to drive components by hand.
    pub fn new(
        time: &'a GameTime,
        components: &'a [ComponentRef],
        view: &'a mut Affine2,
        commands: &'a mut CommandQueue,
    ) -> Self {
        Self {
            time,
            components,
            current: None,
            view,
            commands,
        }
    }

    /// Marks the component being updated, excluding it from `others()`.
    pub fn with_current(mut self, id: ComponentId) -> Self {
        self.current = Some(id);
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn time(&self) -> &GameTime {
        self.time
    }

    /// The whole pass snapshot, in registry order.
    pub fn components(&self) -> &[ComponentRef] {
        self.components
    }

    /// Snapshot entries other than the component being updated.
    pub fn others(&self) -> impl Iterator<Item = &'a ComponentRef> {
        let current = self.current;
        self.components
            .iter()
            .filter(move |c| Some(ComponentId::of(c)) != current)
    }

    pub fn view_transform(&self) -> Affine2 {
        *self.view
    }

    //--- Requests ---------------------------------------------------------

    /// Installs the transform the draw pass pushes around every drawable.
    pub fn set_view_transform(&mut self, transform: Affine2) {
        *self.view = transform;
    }

    pub fn spawn(&mut self, component: ComponentRef) {
        self.commands.push(Command::Spawn(component));
    }

    pub fn despawn(&mut self, component: ComponentRef) {
        self.commands.push(Command::Despawn(component));
    }

    pub fn push_scene(&mut self, scene: Box<dyn Scene>) {
        self.commands.push(Command::PushScene(scene));
    }

    pub fn pop_scene(&mut self) {
        self.commands.push(Command::PopScene);
    }

    pub fn suspend(&mut self) {
        self.commands.push(Command::Suspend);
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::{same_component, Component};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Dummy;

    impl Component for Dummy {}

    fn dummy() -> ComponentRef {
        Rc::new(RefCell::new(Dummy))
    }

    #[test]
    fn others_skips_current() {
        let (a, b, c) = (dummy(), dummy(), dummy());
        let snapshot = vec![Rc::clone(&a), Rc::clone(&b), Rc::clone(&c)];
        let time = GameTime::default();
        let mut view = Affine2::IDENTITY;
        let mut commands = CommandQueue::new();

        let ctx = UpdateContext::new(&time, &snapshot, &mut view, &mut commands)
            .with_current(ComponentId::of(&b));

        let others: Vec<&ComponentRef> = ctx.others().collect();
        assert_eq!(others.len(), 2);
        assert!(same_component(others[0], &a));
        assert!(same_component(others[1], &c));
        assert_eq!(ctx.components().len(), 3);
    }

    #[test]
    fn requests_are_queued_not_applied() {
        let time = GameTime::default();
        let mut view = Affine2::IDENTITY;
        let mut commands = CommandQueue::new();

        {
            let mut ctx = UpdateContext::new(&time, &[], &mut view, &mut commands);
            ctx.spawn(dummy());
            ctx.pop_scene();
            ctx.exit();
            ctx.set_view_transform(Affine2::from_translation(Vec2::new(1.0, 2.0)));
        }

        assert_eq!(commands.len(), 3);
        assert_eq!(view.translation, Vec2::new(1.0, 2.0));
    }
}
