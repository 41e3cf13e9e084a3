//=========================================================================
// Input Manager
//
// Persistent component that turns key events into logical input
// snapshots, once per tick.
//
// Responsibilities:
// - Drain key events from the platform channel (or a local queue)
// - Track which keys are held between samples
// - Roll `previous = current; current = sample(held keys)`
// - Answer edge and delta queries against the two snapshots
//
// Runs at `SuperHigh` priority so every other update in the tick sees
// the fresh sample.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use glam::Vec2;
use log::trace;

//=== Internal Dependencies ===============================================

use super::bindings::{Binding, KeyBindings};
use super::controls::{Button, ButtonState, InputSnapshot, Pov, Stick, Trigger};
use super::event::InputEvent;
use super::state_tracker::StateTracker;
use crate::core::component::{Component, Priority, UpdateContext};

//=== InputManager ========================================================

pub struct InputManager {
    bindings: KeyBindings,
    tracker: StateTracker,
    receiver: Option<Receiver<InputEvent>>,
    pending: Vec<InputEvent>,
    previous: InputSnapshot,
    current: InputSnapshot,
}

impl InputManager {
    //--- Construction -----------------------------------------------------

    /// Manager fed through [`InputManager::push_event`] only.
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            tracker: StateTracker::new(),
            receiver: None,
            pending: Vec::new(),
            previous: InputSnapshot::new(),
            current: InputSnapshot::new(),
        }
    }

    /// Manager plus the sender the platform layer feeds key events into.
    pub fn channel(bindings: KeyBindings) -> (Self, Sender<InputEvent>) {
        let (tx, rx) = unbounded();
        let mut manager = Self::new(bindings);
        manager.receiver = Some(rx);
        (manager, tx)
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    //--- Event Intake -----------------------------------------------------

    /// Queues an event for the next sample.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    //--- Sampling ---------------------------------------------------------

    /// Consumes queued events and rolls the snapshots.
    pub fn sample(&mut self) {
        if let Some(receiver) = &self.receiver {
            self.pending.extend(receiver.try_iter());
        }
        let events = std::mem::take(&mut self.pending);
        self.tracker.process_events(&events);

        let next = self.build_snapshot();
        if next != self.current {
            trace!(target: "input", "Input changed after {} events", events.len());
        }
        self.previous = std::mem::replace(&mut self.current, next);
    }

    fn build_snapshot(&self) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new();
        let mut buttons_down = [false; 9];
        let mut triggers = [0.0f32; 2];
        let mut sticks = [Vec2::ZERO; 2];
        let mut pov = Pov::None;

        // Held keys are oldest first, so the last POV key seen wins
        for &key in self.tracker.held() {
            match self.bindings.resolve(key) {
                Some(Binding::Button(button)) => buttons_down[button as usize] = true,
                Some(Binding::Trigger(trigger)) => triggers[trigger as usize] = 1.0,
                Some(Binding::Stick { stick, direction }) => sticks[stick as usize] += direction,
                Some(Binding::Pov(direction)) => pov = direction,
                None => {}
            }
        }

        for button in Button::ALL {
            let state = self.current.button(button).next(buttons_down[button as usize]);
            snapshot.set_button(button, state);
        }
        snapshot.set_trigger(Trigger::L, triggers[Trigger::L as usize]);
        snapshot.set_trigger(Trigger::R, triggers[Trigger::R as usize]);
        snapshot.set_stick(Stick::L, sticks[Stick::L as usize]);
        snapshot.set_stick(Stick::R, sticks[Stick::R as usize]);
        snapshot.set_pov(pov);
        snapshot
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    pub fn previous(&self) -> &InputSnapshot {
        &self.previous
    }

    pub fn button(&self, button: Button) -> ButtonState {
        self.current.button(button)
    }

    pub fn is_button_press(&self, button: Button) -> bool {
        self.current.is_button_press(button)
    }

    /// Trigger change since the previous sample.
    pub fn trigger_delta(&self, trigger: Trigger) -> f32 {
        self.current.trigger(trigger) - self.previous.trigger(trigger)
    }

    /// Stick change since the previous sample.
    pub fn stick_delta(&self, stick: Stick) -> Vec2 {
        self.current.stick(stick) - self.previous.stick(stick)
    }
}

impl Component for InputManager {
    fn update_order(&self) -> i32 {
        Priority::SuperHigh.value()
    }

    fn is_persistent(&self) -> bool {
        true
    }

    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {
        self.sample();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
