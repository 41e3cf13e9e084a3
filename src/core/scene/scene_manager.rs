//=========================================================================
// Scene Manager
//=========================================================================
//
// Owns the scene stack and swaps the registry contents on push/pop.
//
// Every operation here replaces the registry wholesale. The game only
// calls into the manager at tick boundaries (or outside a tick), never
// while a pass iterates a snapshot.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::Scene;
use crate::core::component::{ComponentRef, Registry};

//=== SceneFactory ========================================================

/// Builds a fresh default scene whenever the stack runs empty.
pub type SceneFactory = Box<dyn Fn() -> Box<dyn Scene>>;

//=== SceneSlot ===========================================================

struct SceneSlot {
    scene: Box<dyn Scene>,
    /// The scene's own components while it is buried under another scene.
    archived: Vec<ComponentRef>,
}

//=== SceneManager ========================================================

#[derive(Default)]
pub struct SceneManager {
    stack: Vec<SceneSlot>,
    default: Option<SceneFactory>,
}

impl SceneManager {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(factory: SceneFactory) -> Self {
        Self {
            stack: Vec::new(),
            default: Some(factory),
        }
    }

    pub fn set_default(&mut self, factory: SceneFactory) {
        self.default = Some(factory);
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Name of the active scene.
    pub fn top_name(&self) -> Option<&'static str> {
        self.stack.last().map(|slot| slot.scene.name())
    }

    /// Scene names from bottom to top.
    pub fn names(&self) -> Vec<&'static str> {
        self.stack.iter().map(|slot| slot.scene.name()).collect()
    }

    //--- Stack Operations -------------------------------------------------

    /// Makes `scene` the active scene.
    ///
    /// The outgoing scene's own components are archived on it. On an
    /// empty stack there is no outgoing scene, so any non-persistent
    /// components already registered are adopted by `scene`.
    pub fn push(&mut self, mut scene: Box<dyn Scene>, registry: &mut Registry) {
        let (mut live, transient) = registry.take_partitioned();

        match self.stack.last_mut() {
            Some(outgoing) => {
                debug!(
                    target: "scene",
                    "Archiving {} components on scene {}",
                    transient.len(),
                    outgoing.scene.name()
                );
                outgoing.archived = transient;
                outgoing.scene.suspend();
            }
            None => live.extend(transient),
        }

        let own = scene.initialize();
        debug!(
            target: "scene",
            "Pushing scene {} ({} components, depth {})",
            scene.name(),
            own.len(),
            self.stack.len() + 1
        );
        live.extend(own);
        registry.replace(live);

        self.stack.push(SceneSlot {
            scene,
            archived: Vec::new(),
        });
        if let Some(top) = self.stack.last_mut() {
            top.scene.pushed();
        }
    }

    /// Removes the active scene and restores the one below it.
    ///
    /// The popped scene's own components are dropped from the registry.
    /// Returns `None` (and changes nothing) on an empty stack.
    pub fn pop(&mut self, registry: &mut Registry) -> Option<Box<dyn Scene>> {
        let Some(mut popped) = self.stack.pop() else {
            warn!(target: "scene", "Attempted to pop an empty scene stack");
            return None;
        };

        debug!(
            target: "scene",
            "Popping scene {} (depth {})",
            popped.scene.name(),
            self.stack.len()
        );
        popped.scene.popped();

        let (mut live, _discarded) = registry.take_partitioned();

        if let Some(restored) = self.stack.last_mut() {
            live.append(&mut restored.archived);
            registry.replace(live);
            restored.scene.resume();
        } else {
            registry.replace(live);
        }

        Some(popped.scene)
    }

    /// Pushes a fresh default scene if the stack is empty and a factory
    /// is configured. Returns `true` if a scene was pushed.
    pub fn ensure_active(&mut self, registry: &mut Registry) -> bool {
        if !self.stack.is_empty() {
            return false;
        }
        let Some(factory) = self.default.as_ref() else {
            return false;
        };

        let scene = factory();
        debug!(target: "scene", "Scene stack empty, pushing default scene {}", scene.name());
        self.push(scene, registry);
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
