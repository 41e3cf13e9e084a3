//=========================================================================
// Collision Notification
//=========================================================================
//
// Exhaustive pairwise notification pass. No broad phase and no response:
// the manager only tells every collision-capable component about every
// other one; each component decides for itself what an intersection
// means (usually via `BoundingVolume::intersects`).
//
// Per tick:
// ```text
//   1. gather   Collider { id, bounding } for every Collidable in the
//               snapshot (one borrow each, released immediately)
//   2. notify   for each Collidable c, for each collider t:
//                 c.collision(&t)
// ```
//
// Gathering first means every notification in a tick sees the same
// volumes, whatever order the callbacks mutate state in.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::bounding::BoundingVolume;
use crate::core::component::{Component, ComponentId, ComponentRef, Priority, UpdateContext};

//=== Collider ============================================================

/// Snapshot of one collision participant for the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: ComponentId,
    pub bounding: BoundingVolume,
}

impl Collider {
    pub fn new(id: ComponentId, bounding: BoundingVolume) -> Self {
        Self { id, bounding }
    }

    pub fn intersects(&self, other: &Collider) -> bool {
        self.bounding.intersects(&other.bounding)
    }
}

//=== Collidable Trait ====================================================

/// Collision-pass capability.
pub trait Collidable {
    /// World-space volume published to the other participants.
    fn collision_bounds(&self) -> BoundingVolume;

    /// Called once per participant per tick (see [`CollisionPairing`]).
    fn collision(&mut self, other: &Collider);
}

//=== CollisionPairing ====================================================

/// Which ordered pairs are notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPairing {
    /// Every ordered pair, self pairs included: each of `n` participants
    /// receives `n` notifications per tick.
    #[default]
    AllOrderedPairs,

    /// Self pairs skipped: each participant receives `n - 1`.
    DistinctPairs,
}

//=== CollisionManager ====================================================

/// Runs the notification pass at [`Priority::VeryHigh`].
#[derive(Debug)]
pub struct CollisionManager {
    pub pairing: CollisionPairing,
    pub enabled: bool,
    pub persistent: bool,
}

impl CollisionManager {
    pub fn new() -> Self {
        Self {
            pairing: CollisionPairing::default(),
            enabled: true,
            persistent: false,
        }
    }

    pub fn with_pairing(mut self, pairing: CollisionPairing) -> Self {
        self.pairing = pairing;
        self
    }

    pub fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    fn gather<'c>(
        candidates: impl Iterator<Item = &'c ComponentRef>,
    ) -> Vec<(&'c ComponentRef, Collider)> {
        candidates
            .filter_map(|candidate| {
                let mut component = candidate.try_borrow_mut().ok()?;
                let bounding = component.as_collidable_mut()?.collision_bounds();
                Some((candidate, Collider::new(ComponentId::of(candidate), bounding)))
            })
            .collect()
    }
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CollisionManager {
    fn enabled(&self) -> bool {
        self.enabled
    }

    fn update_order(&self) -> i32 {
        Priority::VeryHigh.value()
    }

    fn is_persistent(&self) -> bool {
        self.persistent
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let participants = Self::gather(ctx.others());
        let mut notifications = 0usize;

        for (target, own) in &participants {
            let Ok(mut component) = target.try_borrow_mut() else {
                continue;
            };
            let Some(collidable) = component.as_collidable_mut() else {
                continue;
            };

            for (_, other) in &participants {
                if self.pairing == CollisionPairing::DistinctPairs && other.id == own.id {
                    continue;
                }
                collidable.collision(other);
                notifications += 1;
            }
        }

        trace!(
            target: "collision",
            "{} participants, {} notifications",
            participants.len(),
            notifications
        );
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
