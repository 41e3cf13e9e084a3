//=========================================================================
// Runtime Errors
//=========================================================================
//
// Error taxonomy for the runtime core.
//
//   EngineError   lifecycle misuse and configuration errors (fatal,
//                 returned immediately to the caller)
//   PhysicsError  per-object precondition violations (reported, the
//                 offending object is skipped)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use glam::Vec2;

//=== EngineError =========================================================

/// Lifecycle and configuration errors raised by the scheduler and by the
/// text-keyed dispatch tables (bounding kinds, asset kinds).
///
/// None of these are retried: the caller violated a state precondition or
/// supplied a configuration the runtime refuses to guess about.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// `run()` called while the game is already running or suspended.
    AlreadyRunning,

    /// `suspend()` called while already suspended.
    AlreadySuspended,

    /// `resume()` called while not suspended.
    NotSuspended,

    /// Operation requires a running game.
    NotRunning,

    /// The game has exited; the lifecycle is terminal.
    Exited,

    /// Variable time-step scheduling was requested. Only fixed steps exist.
    VariableTimeStep,

    /// A frame rate that is zero, negative or not finite.
    InvalidFrameRate(f64),

    /// Unrecognized bounding-volume tag.
    UnknownBoundingKind(String),

    /// Unrecognized asset content kind.
    UnknownContentKind(String),
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "logic error: already running"),
            Self::AlreadySuspended => write!(f, "logic error: already suspended"),
            Self::NotSuspended => write!(f, "logic error: not suspended"),
            Self::NotRunning => write!(f, "logic error: not running"),
            Self::Exited => write!(f, "logic error: game has exited"),
            Self::VariableTimeStep => {
                write!(f, "configuration error: only fixed time-step is supported")
            }
            Self::InvalidFrameRate(fps) => {
                write!(f, "configuration error: invalid frame rate {}", fps)
            }
            Self::UnknownBoundingKind(tag) => {
                write!(f, "configuration error: unknown bounding kind '{}'", tag)
            }
            Self::UnknownContentKind(tag) => {
                write!(f, "configuration error: unknown content kind '{}'", tag)
            }
        }
    }
}

impl std::error::Error for EngineError {}

//=== PhysicsError ========================================================

/// Precondition violations detected while feeding the physics chain.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A force was applied to a body whose mass is zero.
    ZeroMass { force: Vec2 },

    /// A force was applied to a body whose mass is infinite or NaN.
    NonFiniteMass { force: Vec2, mass: f32 },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMass { force } => {
                write!(f, "force ({}, {}) applied to a body with zero mass", force.x, force.y)
            }
            Self::NonFiniteMass { force, mass } => write!(
                f,
                "force ({}, {}) applied to a body with non-finite mass {}",
                force.x, force.y, mass
            ),
        }
    }
}

impl std::error::Error for PhysicsError {}

//=========================================================================
// Unit Tests
//=========================================================================
