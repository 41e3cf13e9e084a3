//=========================================================================
// Command Queue
//=========================================================================
//
// Deferred registry, scene and lifecycle mutations.
//
// Components queue commands through their `UpdateContext` while a pass is
// iterating a registry snapshot. The game drains the queue at the tick
// boundary, after the draw pass, in FIFO order.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::component::ComponentRef;
use crate::core::scene::Scene;

//=== Command =============================================================

/// A mutation requested during a pass.
pub enum Command {
    /// Registers a component.
    Spawn(ComponentRef),

    /// Unregisters a component.
    Despawn(ComponentRef),

    /// Pushes a scene onto the scene stack.
    PushScene(Box<dyn Scene>),

    /// Pops the top scene.
    PopScene,

    /// Suspends the game.
    Suspend,

    /// Exits the game.
    Exit,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spawn(_) => f.write_str("Spawn"),
            Self::Despawn(_) => f.write_str("Despawn"),
            Self::PushScene(scene) => write!(f, "PushScene({})", scene.name()),
            Self::PopScene => f.write_str("PopScene"),
            Self::Suspend => f.write_str("Suspend"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

//=== CommandQueue ========================================================

#[derive(Debug, Default)]
pub struct CommandQueue {
    queue: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a command for the next tick boundary.
    pub fn push(&mut self, command: Command) {
        self.queue.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all queued commands in FIFO order, leaving the queue empty.
    ///
    /// Commands queued while the returned batch is being applied land in
    /// the (now empty) queue and wait for the following boundary.
    pub fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
