//=========================================================================
// Platform Subsystem
//
// Drives a `Game` from the winit event loop on the main thread.
//
// Architecture:
// ```text
//  winit Event Loop (main thread)
//   │
//   ├─ KeyboardInput ──► InputProcessor ──► channel ──► InputManager
//   │
//   ├─ about_to_wait ──► FrameSignal pending?
//   │                      ├─ step elapsed  → request_redraw()
//   │                      └─ not yet       → ControlFlow::WaitUntil
//   │
//   ├─ RedrawRequested ─► Game::tick(surface)
//   │
//   ├─ suspended/resumed ─► Game::suspend / Game::resume
//   └─ CloseRequested ──► Game::exit + event_loop.exit()
// ```
//
// The game asks for frames through its `FrameSignal`; the platform is the
// only thing that grants them. Ticks are spaced `target_step` apart.
//
// Responsibilities:
// - Create and manage the OS window
// - Convert winit key events → runtime InputEvents
// - Pace ticks to the game's fixed step
// - Forward app lifecycle to the scheduler
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::time::Instant;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::error::EngineError;
use crate::core::input::InputEvent;
use crate::core::render::Surface;
use crate::core::time::FrameSignal;
use crate::engine::{Game, GameBuilder, RunState};
use input_processor::InputProcessor;

//=== PlatformConfig ======================================================

/// Window settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformConfig {
    pub title: String,

    /// Logical inner size (width, height).
    pub size: (u32, u32),
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            title: "Arcade Runtime".to_string(),
            size: (800, 600),
        }
    }
}

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop the game cannot run.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    EventLoopCreation(winit::error::EventLoopError),

    /// Event loop execution error.
    EventLoopExecution(winit::error::EventLoopError),

    /// The game refused to build or start.
    Engine(EngineError),
}

//--- Trait Implementations -----------------------------------------------

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
            Self::Engine(e) => write!(f, "Game error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<EngineError> for PlatformError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}

//=== Platform ============================================================

/// Window owner and tick driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(builder, surface, config)` builds the
///    game with the platform's frame signal installed
/// 2. **Setup**: register components through [`Platform::game_mut`]
/// 3. **Execution**: `platform.run()` starts the game and the event loop
/// 4. **Shutdown**: window close or `Game::exit` ends the loop
///
/// # Thread Safety
///
/// This type is NOT Send/Sync; it must remain on the main thread.
///
/// # Examples
///
/// ```ignore
/// let (input, sender) = InputManager::channel(bindings);
/// let mut platform = Platform::new(GameBuilder::new(), Box::new(surface), PlatformConfig::default())?
///     .with_input(sender);
/// platform.game_mut().add(input);
/// platform.run()?;
/// ```
pub struct Platform {
    game: Game,
    surface: Box<dyn Surface>,
    frame_signal: FrameSignal,
    input: Option<Sender<InputEvent>>,
    processor: InputProcessor,
    config: PlatformConfig,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    /// Earliest moment the next tick may run.
    next_tick: Instant,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Builds the game from `builder`, replacing its frame clock with the
    /// platform's own signal.
    ///
    /// Does not create the window yet; that happens in `resumed()`.
    pub fn new(
        builder: GameBuilder,
        surface: Box<dyn Surface>,
        config: PlatformConfig,
    ) -> Result<Self, PlatformError> {
        let frame_signal = FrameSignal::new();
        let game = builder
            .with_frame_clock(Box::new(frame_signal.clone()))
            .build()?;

        info!(target: "platform", "Platform initialized ('{}')", config.title);
        Ok(Self {
            game,
            surface,
            frame_signal,
            input: None,
            processor: InputProcessor::new(),
            config,
            window: None,
            next_tick: Instant::now(),
        })
    }

    /// Forwards key events into an input manager's channel.
    pub fn with_input(mut self, sender: Sender<InputEvent>) -> Self {
        self.input = Some(sender);
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    //--- Execution --------------------------------------------------------

    /// Starts the game and blocks in the winit event loop until it exits.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created, the
    /// game cannot start, or the loop fails.
    ///
    /// # Panics
    ///
    /// Panics if called off the main thread (macOS/iOS winit requirement).
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        self.game.run()?;
        self.next_tick = Instant::now();

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    fn send_input(&self, event: InputEvent) {
        let Some(sender) = &self.input else {
            return;
        };
        if sender.send(event).is_err() {
            warn!(target: "platform", "Input channel disconnected, dropping {:?}", event);
        }
    }

    fn tick(&mut self) {
        if !self.frame_signal.take() {
            return;
        }
        self.next_tick = Instant::now() + self.game.target_step();
        self.game.tick(self.surface.as_mut());
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) {
        let (width, height) = self.config.size;
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.game.exit();
                event_loop.exit();
            }
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Called on startup and on mobile resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.state() == RunState::Suspended {
            if let Err(e) = self.game.resume() {
                warn!(target: "platform", "Resume failed: {}", e);
            }
            self.next_tick = Instant::now();
        }

        if self.window.is_none() {
            self.create_window(event_loop);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if let Err(e) = self.game.suspend() {
            debug!(target: "platform", "Suspend ignored: {}", e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.game.exit();
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if let Some(event) = self.processor.process_key_event(key_event) {
                    self.send_input(event);
                } else {
                    trace!(target: "platform", "Key ignored (repeat or unmapped)");
                }
            }

            WindowEvent::RedrawRequested => self.tick(),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.game.state() == RunState::Exited {
            event_loop.exit();
            return;
        }

        if !self.frame_signal.is_pending() {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        }

        if Instant::now() >= self.next_tick {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
