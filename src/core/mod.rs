//=========================================================================
// Core Runtime
//
// Everything the scheduler drives, independent of any window system.
//
// Layout:
// ```text
//   component/      Component trait, registry, per-update context
//   scene/          Scene trait and the scene stack
//   physics/        Bodies, forces and collision notification
//   input/          Key events → logical controller snapshots
//   camera          View transform components
//   bounding        Bounding volumes and intersection
//   command_queue   Mutations deferred to the tick boundary
//   render          Surface seam and a recording surface
//   time            Game time, wall clocks, frame clocks
//   asset           Content kinds and the loader seam
//   error           Runtime error types
// ```
//
//=========================================================================

//=== Module Declarations =================================================

pub mod asset;
pub mod bounding;
pub mod camera;
pub mod command_queue;
pub mod component;
pub mod error;
pub mod input;
pub mod physics;
pub mod render;
pub mod scene;
pub mod time;
