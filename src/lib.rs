//=========================================================================
// Arcade Runtime: Library Root
//
// Fixed-step entity runtime for 2D action games.
//
// Responsibilities:
// - Expose the scheduler (`Game`, `GameBuilder`)
// - Expose the core component, scene, physics and input systems
// - Provide a winit driver (`platform`) that paces ticks and feeds input
//
// Typical usage:
// ```ignore
// use arcade_runtime::prelude::*;
//
// let (input, keys) = InputManager::channel(bindings);
// let mut platform = Platform::new(GameBuilder::new(), surface, PlatformConfig::default())?
//     .with_input(keys);
// platform.game_mut().add(input);
// platform.run()?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything the scheduler drives and is usable without a
// window (tests drive it with `ManualClock` and `FrameSignal`).
//
// `platform` is the winit integration.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Game, GameBuilder, RunState};
