//! Immediate-mode drawing seam.
//!
//! Render callbacks receive a `&mut dyn DrawSurface`.  What actually ends up
//! on screen is decided by whoever implements the trait; the core only needs
//! a transform stack (for the camera and its shake) and a way to emit
//! rectangles for debug views.  [`DrawList`] is the recording implementation
//! the runner hands to its presenter.

use glam::Vec2;

use crate::rect::Rect;

/// Mutable immediate-mode drawing surface.
///
/// `save`/`restore` behave like a canvas state stack: every translation made
/// after a `save` is undone by the matching `restore`.
pub trait DrawSurface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn fill_rect(&mut self, rect: Rect, rgba: [f32; 4]);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate(Vec2),
    FillRect { rect: Rect, rgba: [f32; 4] },
}

/// A [`DrawSurface`] that records commands for a presenter to replay.
///
/// Tracks the current translation so callers (and tests) can check that
/// scoped transforms were unwound.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    stack:    Vec<Vec2>,
    offset:   Vec2,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every recorded command and reset the transform.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.stack.clear();
        self.offset = Vec2::ZERO;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Translation currently in effect.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Number of unmatched `save` calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl DrawSurface for DrawList {
    fn save(&mut self) {
        self.stack.push(self.offset);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        // an unmatched restore is ignored, like a canvas context would
        if let Some(offset) = self.stack.pop() {
            self.offset = offset;
            self.commands.push(DrawCommand::Restore);
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.offset += offset;
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn fill_rect(&mut self, rect: Rect, rgba: [f32; 4]) {
        self.commands.push(DrawCommand::FillRect { rect, rgba });
    }
}
