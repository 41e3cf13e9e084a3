//=========================================================================
// Time & Clocks
//=========================================================================
//
// Simulated time bookkeeping and the two clock capabilities the
// scheduler is built on.
//
//   WallClock   monotonic "now" used for real-time measurement
//               (total real time, running-slowly detection)
//   FrameClock  external periodic callback primitive; the scheduler asks
//               it for the next frame and cancels pending frames on
//               suspend/exit. Whoever owns the clock calls `Game::tick`.
//
// Both are injected so tests can drive the loop synchronously without
// waiting on the wall clock.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

//=== GameTime ============================================================

/// Read-only view of the scheduler's clocks, passed into every update and
/// draw call.
///
/// `elapsed` is always exactly one target step: only fixed-step
/// scheduling exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameTime {
    elapsed: Duration,
    total_simulated: Duration,
    total_real: Duration,
}

impl GameTime {
    pub fn new(elapsed: Duration, total_simulated: Duration, total_real: Duration) -> Self {
        Self {
            elapsed,
            total_simulated,
            total_real,
        }
    }

    /// Simulated time advanced by the current tick.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Simulated time since the game started running.
    pub fn total_simulated(&self) -> Duration {
        self.total_simulated
    }

    /// Wall-clock time since the game started running.
    pub fn total_real(&self) -> Duration {
        self.total_real
    }

    /// `elapsed` in seconds; the `dt` used by all integration formulas.
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    pub fn total_simulated_secs(&self) -> f32 {
        self.total_simulated.as_secs_f32()
    }

    pub fn total_real_secs(&self) -> f32 {
        self.total_real.as_secs_f32()
    }
}

//=== WallClock ===========================================================

/// Monotonic time source. The epoch is arbitrary; only differences matter.
pub trait WallClock {
    fn now(&self) -> Duration;
}

/// `Instant`-backed wall clock.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven wall clock.
///
/// Clones share the same reading, so a test can keep one handle while the
/// game owns another and advance time from inside a component's update.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

//=== FrameClock ==========================================================

/// Periodic callback primitive driving the scheduler.
///
/// The scheduler calls `request_frame` after `run`, `resume` and every
/// completed tick, and `cancel_frame` on `suspend` and `exit`. Not
/// requesting a frame is the only form of cancellation.
pub trait FrameClock {
    fn request_frame(&mut self);
    fn cancel_frame(&mut self);
}

/// Shared "a frame is wanted" flag.
///
/// The driver (the winit platform, or a test loop) polls `take()` and
/// calls `Game::tick` when it returns `true`.
#[derive(Debug, Clone, Default)]
pub struct FrameSignal {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl FrameSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a frame request is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Consumes the outstanding request, if any.
    pub fn take(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total number of frame requests seen.
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameClock for FrameSignal {
    fn request_frame(&mut self) {
        self.pending.set(true);
        self.requests.set(self.requests.get() + 1);
    }

    fn cancel_frame(&mut self) {
        self.pending.set(false);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
