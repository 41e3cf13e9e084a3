//=========================================================================
// Game Scheduler
//
// Fixed-step update/draw loop over the component registry.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  Game  ──run()──>  Running ⇄ Suspended
//         │                        │                   │
//         ├─ with_target_fps()     ├─ add / remove     └─ exit() ─> Exited
//         ├─ with_default_scene()  ├─ push/pop_scene
//         └─ with_*_clock()        └─ tick(surface)  (called by the driver)
// ```
//
// Per tick:
// ```text
//   1. default scene if the stack is empty
//   2. total_simulated += step
//   3. update pass   snapshot → enabled → stable sort(update_order)
//   4. running_slowly = wall time of 3 > step
//   5. draw pass     snapshot → Drawable → stable sort(draw_order)
//                    push_transform(view) / draw / pop_transform
//   6. apply queued commands (FIFO)
//   7. request the next frame if still running
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Affine2;
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::command_queue::{Command, CommandQueue};
use crate::core::component::{Component, ComponentId, ComponentRef, Registry, UpdateContext};
use crate::core::error::EngineError;
use crate::core::render::Surface;
use crate::core::scene::{Scene, SceneFactory, SceneManager};
use crate::core::time::{FrameClock, FrameSignal, GameTime, SystemClock, WallClock};

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **Target FPS**: 60.0 (fixed step of 1/60 s)
/// - **Wall clock**: [`SystemClock`]
/// - **Frame clock**: a private [`FrameSignal`]
/// - **Default scene**: none
///
/// # Examples
///
/// ```ignore
/// use arcade_runtime::GameBuilder;
///
/// let signal = FrameSignal::new();
/// let mut game = GameBuilder::new()
///     .with_target_fps(30.0)
///     .with_default_scene(Box::new(|| Box::new(TitleScene::default())))
///     .with_frame_clock(Box::new(signal.clone()))
///     .build()?;
///
/// game.run()?;
/// while signal.take() {
///     game.tick(&mut surface);
/// }
/// ```
pub struct GameBuilder {
    target_step: Duration,
    fixed_time_step: bool,
    default_scene: Option<SceneFactory>,
    wall_clock: Option<Box<dyn WallClock>>,
    frame_clock: Option<Box<dyn FrameClock>>,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            target_step: Duration::from_secs_f64(1.0 / 60.0),
            fixed_time_step: true,
            default_scene: None,
            wall_clock: None,
            frame_clock: None,
        }
    }

    /// Sets the target frame rate; the step becomes `1 / fps` seconds.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `fps` is not a positive finite number, or is so large that
    /// the step rounds to zero nanoseconds.
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        let step = step_for_fps(fps);
        assert!(step.is_some(), "Target FPS must be positive with a non-zero step, got {}", fps);
        self.target_step = step.unwrap_or(self.target_step);
        self
    }

    /// Sets the fixed step directly.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn with_target_step(mut self, step: Duration) -> Self {
        assert!(!step.is_zero(), "Target step must be positive");
        self.target_step = step;
        self
    }

    /// Requests fixed (`true`) or variable (`false`) stepping. Only fixed
    /// stepping exists; `false` makes [`GameBuilder::build`] fail.
    pub fn with_fixed_time_step(mut self, fixed: bool) -> Self {
        self.fixed_time_step = fixed;
        self
    }

    /// Scene pushed whenever a tick starts with an empty scene stack.
    pub fn with_default_scene(mut self, factory: SceneFactory) -> Self {
        self.default_scene = Some(factory);
        self
    }

    pub fn with_wall_clock(mut self, clock: Box<dyn WallClock>) -> Self {
        self.wall_clock = Some(clock);
        self
    }

    pub fn with_frame_clock(mut self, clock: Box<dyn FrameClock>) -> Self {
        self.frame_clock = Some(clock);
        self
    }

    /// Builds the game in the not-running state.
    pub fn build(self) -> Result<Game, EngineError> {
        if !self.fixed_time_step {
            return Err(EngineError::VariableTimeStep);
        }

        info!(
            target: "scheduler",
            "Building game (step: {:?}, default scene: {})",
            self.target_step,
            self.default_scene.is_some()
        );

        let scenes = match self.default_scene {
            Some(factory) => SceneManager::with_default(factory),
            None => SceneManager::new(),
        };

        Ok(Game {
            state: RunState::NotRunning,
            registry: Registry::new(),
            scenes,
            commands: CommandQueue::new(),
            target_step: self.target_step,
            wall_clock: self.wall_clock.unwrap_or_else(|| Box::new(SystemClock::new())),
            frame_clock: self.frame_clock.unwrap_or_else(|| Box::new(FrameSignal::new())),
            started_at: Duration::ZERO,
            time: GameTime::default(),
            running_slowly: false,
            tick_count: 0,
            view: Affine2::IDENTITY,
        })
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed step for a frame rate, or `None` if `fps` is not positive and
/// finite or the step rounds to zero.
fn step_for_fps(fps: f64) -> Option<Duration> {
    if !(fps > 0.0 && fps.is_finite()) {
        return None;
    }
    Some(Duration::from_secs_f64(1.0 / fps)).filter(|step| !step.is_zero())
}

//=== RunState ============================================================

/// Scheduler lifecycle. `Exited` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotRunning,
    Running,
    Suspended,
    Exited,
}

//=== Game ================================================================

/// The scheduler: owns the registry, the scene stack and the clocks.
///
/// The game does not loop by itself. After [`Game::run`] it asks its
/// [`FrameClock`] for a frame; whoever drives that clock calls
/// [`Game::tick`] once per granted frame.
pub struct Game {
    state: RunState,
    registry: Registry,
    scenes: SceneManager,
    commands: CommandQueue,
    target_step: Duration,
    wall_clock: Box<dyn WallClock>,
    frame_clock: Box<dyn FrameClock>,
    started_at: Duration,
    time: GameTime,
    running_slowly: bool,
    tick_count: u64,
    view: Affine2,
}

impl Game {
    //--- Lifecycle --------------------------------------------------------

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Starts the game and requests the first frame.
    pub fn run(&mut self) -> Result<(), EngineError> {
        match self.state {
            RunState::Running | RunState::Suspended => Err(EngineError::AlreadyRunning),
            RunState::Exited => Err(EngineError::Exited),
            RunState::NotRunning => {
                self.started_at = self.wall_clock.now();
                self.state = RunState::Running;
                info!(target: "scheduler", "Game running (step: {:?})", self.target_step);
                self.frame_clock.request_frame();
                Ok(())
            }
        }
    }

    /// Pauses ticking and cancels the pending frame.
    pub fn suspend(&mut self) -> Result<(), EngineError> {
        match self.state {
            RunState::Suspended => Err(EngineError::AlreadySuspended),
            RunState::Running => {
                self.state = RunState::Suspended;
                info!(target: "scheduler", "Game suspended after {} ticks", self.tick_count);
                self.frame_clock.cancel_frame();
                Ok(())
            }
            RunState::NotRunning | RunState::Exited => Err(EngineError::NotRunning),
        }
    }

    /// Continues a suspended game and requests a frame.
    pub fn resume(&mut self) -> Result<(), EngineError> {
        if self.state != RunState::Suspended {
            return Err(EngineError::NotSuspended);
        }
        self.state = RunState::Running;
        info!(target: "scheduler", "Game resumed");
        self.frame_clock.request_frame();
        Ok(())
    }

    /// Stops the game for good. Calling it again is harmless.
    pub fn exit(&mut self) {
        if self.state == RunState::Exited {
            return;
        }
        self.state = RunState::Exited;
        info!(target: "scheduler", "Game exited after {} ticks", self.tick_count);
        self.frame_clock.cancel_frame();
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one fixed step: update pass, draw pass, queued commands.
    ///
    /// Ignored (returns `false`) unless the game is running.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        if self.state != RunState::Running {
            warn!(target: "scheduler", "Tick ignored while {:?}", self.state);
            return false;
        }

        self.scenes.ensure_active(&mut self.registry);

        let total_simulated = self.time.total_simulated() + self.target_step;
        let pass_start = self.wall_clock.now();
        self.time = GameTime::new(
            self.target_step,
            total_simulated,
            pass_start.saturating_sub(self.started_at),
        );

        self.update_pass();

        let pass_duration = self.wall_clock.now().saturating_sub(pass_start);
        self.running_slowly = pass_duration > self.target_step;
        if self.running_slowly {
            debug!(
                target: "scheduler",
                "Running slowly: update took {:?} (step {:?})",
                pass_duration,
                self.target_step
            );
        }

        self.draw_pass(surface);
        self.apply_commands();

        self.tick_count += 1;
        trace!(target: "scheduler", "Tick {} done", self.tick_count);

        if self.state == RunState::Running {
            self.frame_clock.request_frame();
        }
        true
    }

    fn update_pass(&mut self) {
        let snapshot = self.registry.snapshot();

        let mut active: Vec<(i32, &ComponentRef)> = snapshot
            .iter()
            .filter_map(|component| {
                let inner = component.borrow();
                inner.enabled().then(|| (inner.update_order(), component))
            })
            .collect();
        active.sort_by_key(|(order, _)| *order);

        for (_, component) in active {
            let mut ctx = UpdateContext::new(&self.time, &snapshot, &mut self.view, &mut self.commands)
                .with_current(ComponentId::of(component));
            component.borrow_mut().update(&mut ctx);
        }
    }

    fn draw_pass(&mut self, surface: &mut dyn Surface) {
        let snapshot = self.registry.snapshot();

        let mut drawables: Vec<(i32, &ComponentRef)> = snapshot
            .iter()
            .filter_map(|component| {
                let mut inner = component.borrow_mut();
                let order = inner.draw_order();
                inner.as_drawable_mut().map(|_| (order, component))
            })
            .collect();
        drawables.sort_by_key(|(order, _)| *order);

        for (_, component) in drawables {
            let mut inner = component.borrow_mut();
            if let Some(drawable) = inner.as_drawable_mut() {
                surface.push_transform(self.view);
                drawable.draw(&self.time, surface);
                surface.pop_transform();
            }
        }
    }

    fn apply_commands(&mut self) {
        for command in self.commands.take() {
            trace!(target: "scheduler", "Applying {:?}", command);
            match command {
                Command::Spawn(component) => {
                    self.registry.add(component);
                }
                Command::Despawn(component) => {
                    if !self.registry.remove(&component) {
                        debug!(target: "scheduler", "Despawn of unregistered component ignored");
                    }
                }
                Command::PushScene(scene) => self.scenes.push(scene, &mut self.registry),
                Command::PopScene => {
                    self.scenes.pop(&mut self.registry);
                }
                Command::Suspend => {
                    if let Err(e) = self.suspend() {
                        warn!(target: "scheduler", "Queued suspend failed: {}", e);
                    }
                }
                Command::Exit => self.exit(),
            }
        }
    }

    //--- Registry ---------------------------------------------------------

    /// Registers a component and returns a typed handle to it.
    pub fn add<C: Component + 'static>(&mut self, component: C) -> Rc<RefCell<C>> {
        let handle = Rc::new(RefCell::new(component));
        self.registry.add(handle.clone());
        handle
    }

    /// Registers an existing handle. Returns `false` if already present.
    pub fn add_ref(&mut self, component: ComponentRef) -> bool {
        self.registry.add(component)
    }

    /// Unregisters a component. Returns `false` if it was not registered.
    pub fn remove(&mut self, component: &ComponentRef) -> bool {
        self.registry.remove(component)
    }

    pub fn contains(&self, component: &ComponentRef) -> bool {
        self.registry.contains(component)
    }

    /// Registered components in registry order.
    pub fn components(&self) -> Vec<ComponentRef> {
        self.registry.snapshot()
    }

    //--- Scenes -----------------------------------------------------------

    /// Pushes a scene immediately. Components must use
    /// [`UpdateContext::push_scene`] instead while a pass is running.
    pub fn push_scene(&mut self, scene: Box<dyn Scene>) {
        self.scenes.push(scene, &mut self.registry);
    }

    /// Pops the active scene immediately.
    pub fn pop_scene(&mut self) -> Option<Box<dyn Scene>> {
        self.scenes.pop(&mut self.registry)
    }

    pub fn scenes(&self) -> &SceneManager {
        &self.scenes
    }

    //--- Timing -----------------------------------------------------------

    pub fn target_step(&self) -> Duration {
        self.target_step
    }

    pub fn set_target_step(&mut self, step: Duration) -> Result<(), EngineError> {
        if step.is_zero() {
            return Err(EngineError::InvalidFrameRate(f64::INFINITY));
        }
        self.target_step = step;
        Ok(())
    }

    pub fn target_frames_per_second(&self) -> f64 {
        1.0 / self.target_step.as_secs_f64()
    }

    pub fn set_target_frames_per_second(&mut self, fps: f64) -> Result<(), EngineError> {
        self.target_step = step_for_fps(fps).ok_or(EngineError::InvalidFrameRate(fps))?;
        Ok(())
    }

    /// Clocks as of the last tick.
    pub fn game_time(&self) -> &GameTime {
        &self.time
    }

    /// Whether the last update pass took longer than one step.
    pub fn is_running_slowly(&self) -> bool {
        self.running_slowly
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Transform pushed around every drawable in the draw pass.
    pub fn view_transform(&self) -> Affine2 {
        self.view
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bounding::BoundingVolume;
    use crate::core::camera::Camera;
    use crate::core::physics::{Body, Force, Motion, PhysicsObject};
    use crate::core::component::{Drawable, Priority};
    use crate::core::render::{Color, CommandBuffer, DrawCommand};
    use crate::core::time::ManualClock;
    use glam::Vec2;
    use std::cell::Cell;

    //--- Test Helpers -----------------------------------------------------

    type Log = Rc<RefCell<Vec<&'static str>>>;

    /// Records its name on update and draw.
    struct Recorder {
        name: &'static str,
        order: i32,
        draw_order: i32,
        enabled: bool,
        drawable: bool,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, order: i32, log: &Log) -> Self {
            Self {
                name,
                order,
                draw_order: 0,
                enabled: true,
                drawable: false,
                log: Rc::clone(log),
            }
        }
    }

    impl Component for Recorder {
        fn enabled(&self) -> bool {
            self.enabled
        }

        fn update_order(&self) -> i32 {
            self.order
        }

        fn draw_order(&self) -> i32 {
            self.draw_order
        }

        fn update(&mut self, _ctx: &mut UpdateContext<'_>) {
            self.log.borrow_mut().push(self.name);
        }

        fn as_drawable_mut(&mut self) -> Option<&mut dyn Drawable> {
            if self.drawable {
                Some(self)
            } else {
                None
            }
        }
    }

    impl Drawable for Recorder {
        fn draw(&mut self, _time: &GameTime, surface: &mut dyn Surface) {
            self.log.borrow_mut().push(self.name);
            surface.fill_rect(Vec2::ZERO, Vec2::ONE, Color::WHITE);
        }
    }

    /// Runs an arbitrary closure as its update.
    struct Script(Box<dyn FnMut(&mut UpdateContext<'_>)>);

    impl Script {
        fn new(body: impl FnMut(&mut UpdateContext<'_>) + 'static) -> Self {
            Self(Box::new(body))
        }
    }

    impl Component for Script {
        fn update(&mut self, ctx: &mut UpdateContext<'_>) {
            (self.0)(ctx);
        }
    }

    fn game_with(clock: &ManualClock, signal: &FrameSignal) -> Game {
        GameBuilder::new()
            .with_target_fps(4.0)
            .with_wall_clock(Box::new(clock.clone()))
            .with_frame_clock(Box::new(signal.clone()))
            .build()
            .unwrap()
    }

    fn running_game() -> (Game, ManualClock, FrameSignal) {
        let clock = ManualClock::new();
        let signal = FrameSignal::new();
        let mut game = game_with(&clock, &signal);
        game.run().unwrap();
        (game, clock, signal)
    }

    //=====================================================================
    // GameBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults_to_sixty_fps() {
        let game = GameBuilder::new().build().unwrap();
        assert!((game.target_frames_per_second() - 60.0).abs() < 1e-6);
        assert_eq!(game.state(), RunState::NotRunning);
    }

    #[test]
    fn builder_with_target_fps() {
        let game = GameBuilder::new().with_target_fps(4.0).build().unwrap();
        assert_eq!(game.target_step(), Duration::from_millis(250));
        assert_eq!(game.target_frames_per_second(), 4.0);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_on_zero() {
        GameBuilder::new().with_target_fps(0.0);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_on_negative() {
        GameBuilder::new().with_target_fps(-60.0);
    }

    #[test]
    #[should_panic(expected = "Target FPS must be positive")]
    fn builder_with_target_fps_panics_when_step_rounds_to_zero() {
        GameBuilder::new().with_target_fps(1e10);
    }

    #[test]
    fn variable_time_step_is_a_configuration_error() {
        let result = GameBuilder::new().with_fixed_time_step(false).build();
        assert!(matches!(result, Err(EngineError::VariableTimeStep)));
    }

    //=====================================================================
    // Lifecycle Tests
    //=====================================================================

    #[test]
    fn lifecycle_transitions_and_errors() {
        let clock = ManualClock::new();
        let signal = FrameSignal::new();
        let mut game = game_with(&clock, &signal);

        assert_eq!(game.suspend(), Err(EngineError::NotRunning));
        assert_eq!(game.resume(), Err(EngineError::NotSuspended));

        game.run().unwrap();
        assert!(signal.is_pending());
        assert_eq!(game.run(), Err(EngineError::AlreadyRunning));
        assert_eq!(game.resume(), Err(EngineError::NotSuspended));

        game.suspend().unwrap();
        assert!(!signal.is_pending());
        assert_eq!(game.suspend(), Err(EngineError::AlreadySuspended));
        assert_eq!(game.run(), Err(EngineError::AlreadyRunning));

        game.resume().unwrap();
        assert!(signal.is_pending());

        game.exit();
        assert!(!signal.is_pending());
        assert_eq!(game.state(), RunState::Exited);
        assert_eq!(game.run(), Err(EngineError::Exited));
        game.exit();
    }

    #[test]
    fn tick_is_ignored_unless_running() {
        let clock = ManualClock::new();
        let signal = FrameSignal::new();
        let mut game = game_with(&clock, &signal);
        let mut surface = CommandBuffer::new();

        assert!(!game.tick(&mut surface));
        game.run().unwrap();
        game.suspend().unwrap();
        assert!(!game.tick(&mut surface));
        assert_eq!(game.tick_count(), 0);
    }

    #[test]
    fn each_tick_requests_the_next_frame() {
        let (mut game, _clock, signal) = running_game();
        let mut surface = CommandBuffer::new();

        assert!(signal.take());
        assert!(game.tick(&mut surface));
        assert!(signal.take());
        assert_eq!(signal.requests(), 2);
    }

    //=====================================================================
    // Timing Tests
    //=====================================================================

    #[test]
    fn simulated_time_is_exact_regardless_of_jitter() {
        let (mut game, clock, _signal) = running_game();
        let mut surface = CommandBuffer::new();

        for i in 0..10u64 {
            clock.advance(Duration::from_millis(100 + 37 * (i % 3)));
            game.tick(&mut surface);
        }

        assert_eq!(game.game_time().total_simulated(), Duration::from_millis(250) * 10);
        assert_eq!(game.game_time().elapsed(), Duration::from_millis(250));
        assert_eq!(game.tick_count(), 10);
    }

    #[test]
    fn total_real_time_follows_the_wall_clock() {
        let clock = ManualClock::new();
        clock.set(Duration::from_secs(100));
        let signal = FrameSignal::new();
        let mut game = game_with(&clock, &signal);
        game.run().unwrap();

        clock.advance(Duration::from_millis(1500));
        game.tick(&mut CommandBuffer::new());

        assert_eq!(game.game_time().total_real(), Duration::from_millis(1500));
    }

    #[test]
    fn running_slowly_iff_update_exceeds_step() {
        let (mut game, clock, _signal) = running_game();
        let budget = Rc::new(Cell::new(Duration::from_millis(100)));
        let worker_clock = clock.clone();
        let worker_budget = Rc::clone(&budget);
        game.add(Script::new(move |_ctx| {
            worker_clock.advance(worker_budget.get());
        }));
        let mut surface = CommandBuffer::new();

        game.tick(&mut surface);
        assert!(!game.is_running_slowly());

        budget.set(Duration::from_millis(250));
        game.tick(&mut surface);
        assert!(!game.is_running_slowly(), "exactly one step is not slow");

        budget.set(Duration::from_millis(251));
        game.tick(&mut surface);
        assert!(game.is_running_slowly());

        budget.set(Duration::ZERO);
        game.tick(&mut surface);
        assert!(!game.is_running_slowly());
    }

    #[test]
    fn frame_rate_view_round_trips() {
        let mut game = GameBuilder::new().build().unwrap();
        game.set_target_frames_per_second(8.0).unwrap();
        assert_eq!(game.target_step(), Duration::from_millis(125));
        assert_eq!(game.target_frames_per_second(), 8.0);
        assert_eq!(
            game.set_target_frames_per_second(0.0),
            Err(EngineError::InvalidFrameRate(0.0))
        );
        assert!(game.set_target_step(Duration::ZERO).is_err());
    }

    #[test]
    fn frame_rate_too_high_for_a_step_is_rejected() {
        let mut game = GameBuilder::new().with_target_fps(4.0).build().unwrap();
        assert_eq!(
            game.set_target_frames_per_second(1e10),
            Err(EngineError::InvalidFrameRate(1e10))
        );
        assert_eq!(game.target_step(), Duration::from_millis(250));
    }

    //=====================================================================
    // Pass Ordering Tests
    //=====================================================================

    #[test]
    fn update_pass_sorts_stably_and_skips_disabled() {
        let (mut game, _clock, _signal) = running_game();
        let log: Log = Rc::default();

        game.add(Recorder::new("low", Priority::Low.value(), &log));
        game.add(Recorder::new("first-tie", 0, &log));
        game.add(Recorder::new("high", Priority::High.value(), &log));
        game.add(Recorder::new("second-tie", 0, &log));
        let mut off = Recorder::new("off", Priority::SuperHigh.value(), &log);
        off.enabled = false;
        game.add(off);

        game.tick(&mut CommandBuffer::new());

        assert_eq!(*log.borrow(), vec!["high", "first-tie", "second-tie", "low"]);
    }

    #[test]
    fn all_updates_happen_before_draws() {
        let (mut game, _clock, _signal) = running_game();
        let log: Log = Rc::default();

        let mut a = Recorder::new("a", 0, &log);
        a.drawable = true;
        a.draw_order = 5;
        let mut b = Recorder::new("b", 1, &log);
        b.drawable = true;
        b.draw_order = -5;
        game.add(a);
        game.add(b);

        game.tick(&mut CommandBuffer::new());

        // updates a, b by update order; draws b, a by draw order
        assert_eq!(*log.borrow(), vec!["a", "b", "b", "a"]);
    }

    #[test]
    fn draws_are_bracketed_by_the_camera_transform() {
        let (mut game, _clock, _signal) = running_game();
        let log: Log = Rc::default();
        game.add(Camera::at(Vec2::new(10.0, 20.0)));
        let mut sprite = Recorder::new("sprite", 0, &log);
        sprite.drawable = true;
        game.add(sprite);
        let mut surface = CommandBuffer::new();

        game.tick(&mut surface);

        let view = Affine2::from_translation(Vec2::new(10.0, 20.0));
        assert_eq!(game.view_transform(), view);
        assert_eq!(
            surface.commands(),
            &[
                DrawCommand::PushTransform(view),
                DrawCommand::FillRect { min: Vec2::ZERO, max: Vec2::ONE, color: Color::WHITE },
                DrawCommand::PopTransform,
            ]
        );
        assert_eq!(surface.depth(), 0);
    }

    //=====================================================================
    // Physics Chain Tests
    //=====================================================================

    fn body_at_origin(mass: f32) -> PhysicsObject {
        PhysicsObject::new(
            Body::new(Motion::Accelerated)
                .with_mass(mass)
                .with_bounding(BoundingVolume::point(Vec2::ZERO)),
        )
    }

    fn push_right() -> Force {
        Force::new(BoundingVolume::circle(Vec2::ZERO, 10.0), Vec2::new(1.0, 0.0))
    }

    #[test]
    fn force_then_integration_within_one_tick() {
        let (mut game, _clock, _signal) = running_game();
        // Registered before the force; priorities still run the force first
        let ball = game.add(body_at_origin(2.0));
        game.add(push_right());

        game.tick(&mut CommandBuffer::new());

        // a = 1 / 2, v = a * 0.25, p = v * 0.25
        let ball = ball.borrow();
        let body = &ball.body;
        assert_eq!(body.velocity, Vec2::new(0.125, 0.0));
        assert_eq!(body.position, Vec2::new(0.03125, 0.0));
        assert!(body.accelerations().is_empty());
    }

    #[test]
    fn disabled_body_does_not_bank_forces() {
        let (mut game, _clock, _signal) = running_game();
        let ball = game.add(body_at_origin(1.0));
        ball.borrow_mut().enabled = false;
        game.add(push_right());

        for _ in 0..100 {
            game.tick(&mut CommandBuffer::new());
        }
        assert!(ball.borrow().body.accelerations().is_empty());
        assert_eq!(ball.borrow().body.velocity, Vec2::ZERO);

        ball.borrow_mut().enabled = true;
        game.tick(&mut CommandBuffer::new());

        assert_eq!(ball.borrow().body.velocity, Vec2::new(0.25, 0.0));
    }

    //=====================================================================
    // Deferred Command Tests
    //=====================================================================

    #[test]
    fn spawned_components_join_after_the_pass() {
        let (mut game, _clock, _signal) = running_game();
        let log: Log = Rc::default();
        let child: ComponentRef = Rc::new(RefCell::new(Recorder::new("child", 0, &log)));
        let mut pending = Some(Rc::clone(&child));

        game.add(Script::new(move |ctx| {
            if let Some(child) = pending.take() {
                ctx.spawn(child);
            }
        }));

        game.tick(&mut CommandBuffer::new());
        assert!(game.contains(&child));
        assert!(log.borrow().is_empty(), "spawned component must not run in the spawning tick");

        game.tick(&mut CommandBuffer::new());
        assert_eq!(*log.borrow(), vec!["child"]);
    }

    #[test]
    fn despawn_removes_at_the_boundary() {
        let (mut game, _clock, _signal) = running_game();
        let log: Log = Rc::default();
        let victim: ComponentRef = Rc::new(RefCell::new(Recorder::new("victim", 10, &log)));
        game.add_ref(Rc::clone(&victim));
        let target = Rc::clone(&victim);

        game.add(Script::new(move |ctx| {
            ctx.despawn(Rc::clone(&target));
        }));

        game.tick(&mut CommandBuffer::new());

        // Still updated in the tick that requested its removal
        assert_eq!(*log.borrow(), vec!["victim"]);
        assert!(!game.contains(&victim));
    }

    #[test]
    fn queued_exit_stops_the_loop() {
        let (mut game, _clock, signal) = running_game();
        game.add(Script::new(|ctx| ctx.exit()));
        signal.take();

        assert!(game.tick(&mut CommandBuffer::new()));
        assert_eq!(game.state(), RunState::Exited);
        assert!(!signal.is_pending());
        assert!(!game.tick(&mut CommandBuffer::new()));
    }

    #[test]
    fn queued_suspend_pauses_the_loop() {
        let (mut game, _clock, signal) = running_game();
        game.add(Script::new(|ctx| ctx.suspend()));

        game.tick(&mut CommandBuffer::new());

        assert_eq!(game.state(), RunState::Suspended);
        assert!(!signal.is_pending());
    }

    //=====================================================================
    // Scene Tests
    //=====================================================================

    struct Level {
        pushes: Rc<Cell<u32>>,
        log: Log,
    }

    impl Scene for Level {
        fn initialize(&mut self) -> Vec<ComponentRef> {
            self.pushes.set(self.pushes.get() + 1);
            let level: ComponentRef = Rc::new(RefCell::new(Recorder::new("level", 0, &self.log)));
            vec![level]
        }
    }

    #[test]
    fn default_scene_is_pushed_on_first_tick() {
        let pushes = Rc::new(Cell::new(0));
        let log: Log = Rc::default();
        let (factory_pushes, factory_log) = (Rc::clone(&pushes), Rc::clone(&log));
        let mut game = GameBuilder::new()
            .with_wall_clock(Box::new(ManualClock::new()))
            .with_default_scene(Box::new(move || {
                Box::new(Level {
                    pushes: Rc::clone(&factory_pushes),
                    log: Rc::clone(&factory_log),
                })
            }))
            .build()
            .unwrap();
        game.run().unwrap();

        assert!(game.scenes().is_empty());
        game.tick(&mut CommandBuffer::new());

        assert_eq!(pushes.get(), 1);
        assert_eq!(game.scenes().len(), 1);
        assert_eq!(*log.borrow(), vec!["level"]);

        // Popping the last scene brings a fresh default back next tick
        game.pop_scene();
        game.tick(&mut CommandBuffer::new());
        assert_eq!(pushes.get(), 2);
    }

    #[test]
    fn queued_scene_push_swaps_components_at_the_boundary() {
        let (mut game, _clock, _signal) = running_game();
        let log: Log = Rc::default();
        let pushes = Rc::new(Cell::new(0));
        let scene_log = Rc::clone(&log);
        let scene_pushes = Rc::clone(&pushes);
        let requested = Cell::new(false);

        game.add(Script::new(move |ctx| {
            if !requested.replace(true) {
                ctx.push_scene(Box::new(Level {
                    pushes: Rc::clone(&scene_pushes),
                    log: Rc::clone(&scene_log),
                }));
            }
        }));

        game.tick(&mut CommandBuffer::new());
        assert_eq!(pushes.get(), 1);
        assert!(log.borrow().is_empty());
        // First push on an empty stack adopts the loose script
        assert_eq!(game.components().len(), 2);

        game.tick(&mut CommandBuffer::new());
        assert_eq!(*log.borrow(), vec!["level"]);
    }
}
