//=========================================================================
// State Tracker
//=========================================================================
//
// Held-key bookkeeping between samples.
//
// Architecture:
//   InputEvent → process_events() → held keys (press order) → query
//
// Press order is kept so the most recent of several held POV keys wins.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};

//=== StateTracker ========================================================

#[derive(Debug, Clone, Default)]
pub struct StateTracker {
    /// Keys currently down, oldest press first.
    held: Vec<KeyCode>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Event Processing -------------------------------------------------

    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key } => {
                // Repeats of a held key keep its original position
                if !self.held.contains(&key) {
                    self.held.push(key);
                }
            }
            InputEvent::KeyUp { key } => {
                self.held.retain(|&k| k != key);
            }
        }
    }

    /// Forgets every held key (focus loss, device reset).
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Held keys, oldest press first.
    pub fn held(&self) -> &[KeyCode] {
        &self.held
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
