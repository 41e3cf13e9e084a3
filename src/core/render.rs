//=========================================================================
// Drawing Surface
//=========================================================================
//
// The runtime never touches pixels. It issues transform push/pop and
// primitive commands to a `Surface` supplied by the host (canvas, GPU
// batcher, terminal, ...).
//
//   Game::draw pass ─► push_transform(view) ─► Drawable::draw ─► pop
//
// `CommandBuffer` is a recording surface: it keeps the emitted commands
// and the composed transform stack, which is enough for headless runs
// and for asserting draw order.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Affine2, Vec2};
use log::warn;

//=== Color ===============================================================

/// Linear RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

//=== Surface Trait =======================================================

/// Command sink for one frame of drawing.
///
/// Transforms nest: `push_transform` composes the given transform onto
/// the current one, `pop_transform` restores the previous state. All
/// primitive coordinates are in the space of the current transform.
pub trait Surface {
    fn push_transform(&mut self, transform: Affine2);
    fn pop_transform(&mut self);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_rect(&mut self, min: Vec2, max: Vec2, color: Color);
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
}

//=== DrawCommand =========================================================

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PushTransform(Affine2),
    PopTransform,
    StrokeCircle { center: Vec2, radius: f32, color: Color },
    StrokeRect { min: Vec2, max: Vec2, color: Color },
    FillRect { min: Vec2, max: Vec2, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
}

//=== CommandBuffer =======================================================

/// Recording [`Surface`].
///
/// Unbalanced `pop_transform` calls are ignored (and logged) rather than
/// corrupting the stack.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
    stack: Vec<Affine2>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last `clear`.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Composed transform currently in effect.
    pub fn current_transform(&self) -> Affine2 {
        self.stack.last().copied().unwrap_or(Affine2::IDENTITY)
    }

    /// Number of transforms currently pushed.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drops recorded commands and resets the transform stack.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stack.clear();
    }

    /// Takes the recorded commands, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for CommandBuffer {
    fn push_transform(&mut self, transform: Affine2) {
        let composed = self.current_transform() * transform;
        self.stack.push(composed);
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        if self.stack.pop().is_none() {
            warn!(target: "render", "pop_transform without matching push ignored");
            return;
        }
        self.commands.push(DrawCommand::PopTransform);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeCircle { center, radius, color });
    }

    fn stroke_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { min, max, color });
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, max, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
