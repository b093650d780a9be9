use stroll_core::DrawSurface;
use winit::event::WindowEvent;

use crate::context::AppContext;

/// The trait a game implements to run inside the shell.
///
/// All methods have empty default implementations so you only override what
/// you need.
///
/// ```rust,ignore
/// struct Walk { session: Session<String> }
///
/// impl StrollApp for Walk {
///     fn update(&mut self, ctx: &mut AppContext) {
///         self.session.update(ctx.input, ctx.dt);
///     }
///
///     fn draw(&self, surface: &mut dyn DrawSurface, _ctx: &AppContext) {
///         self.session.draw(surface);
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait StrollApp {
    /// Called once, after the window exists and before the first frame.
    fn setup(&mut self, ctx: &mut AppContext) {}

    /// Called every frame before drawing.
    fn update(&mut self, ctx: &mut AppContext) {}

    /// Emit this frame's draw commands.  Runs after every `update` of the
    /// frame and cannot mutate the game.
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &AppContext) {}

    /// Called whenever the window is resized.
    fn on_resize(&mut self, new_size: (u32, u32), ctx: &mut AppContext) {}

    /// Called for every raw winit `WindowEvent`, after the runner has fed
    /// it to the input state.
    fn on_window_event(&mut self, event: &WindowEvent, ctx: &mut AppContext) {}
}
