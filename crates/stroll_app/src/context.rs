use stroll_core::{InputState, Vec2};

/// Per-frame context passed to every [`StrollApp`](crate::StrollApp) callback.
///
/// ```rust,ignore
/// fn update(&mut self, ctx: &mut AppContext) {
///     self.session.update(ctx.input, ctx.dt);
///     if ctx.input.is_key_just_pressed(KeyCode::F10) {
///         ctx.request_exit();
///     }
/// }
/// ```
pub struct AppContext<'a> {
    // ── Read-only ──────────────────────────────────────────────────────────
    /// Input state for this frame.  Edges are cleared by the runner after
    /// the frame has been drawn.
    pub input: &'a InputState,

    /// Seconds since the previous frame, already capped.
    pub dt: f32,

    /// Current window size in physical pixels.
    pub window_size: (u32, u32),

    // ── Read-write ─────────────────────────────────────────────────────────
    pub(crate) exit_requested: bool,
}

impl<'a> AppContext<'a> {
    pub fn new(input: &'a InputState, dt: f32, window_size: (u32, u32)) -> Self {
        Self {
            input,
            dt,
            window_size,
            exit_requested: false,
        }
    }

    /// Signal the event loop to shut down after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.window_size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.window_size.1
    }

    /// Window size as a viewport vector.
    #[inline]
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.window_size.0 as f32, self.window_size.1 as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_is_sticky() {
        let input = InputState::new();
        let mut ctx = AppContext::new(&input, 0.016, (800, 600));
        assert!(!ctx.exit_requested());
        ctx.request_exit();
        assert!(ctx.exit_requested());
        assert_eq!(ctx.viewport(), Vec2::new(800.0, 600.0));
    }
}
