//! The stock game: walk a [`ZoneLayout`] world and open whatever you stand
//! next to.

use log::{debug, info};
use stroll_core::{
    DrawSurface, GameConfig, GameEvents, MotionEvents, Session, Vec2, ZoneLayout,
};

use crate::builder::AppConfig;
use crate::context::AppContext;
use crate::traits::StrollApp;

/// Forwards game events to the log under the `stroll::cue` target, where an
/// audio layer (or a curious developer) can pick them up.
#[derive(Debug, Default)]
pub struct CueLog {
    pub cues: u64,
}

impl MotionEvents for CueLog {
    fn on_jump(&mut self) {
        self.cues += 1;
        debug!(target: "stroll::cue", "jump");
    }

    fn on_land(&mut self) {
        self.cues += 1;
        debug!(target: "stroll::cue", "land");
    }

    fn on_step(&mut self, sprinting: bool) {
        self.cues += 1;
        debug!(target: "stroll::cue", "step sprinting={sprinting}");
    }
}

impl GameEvents<String> for CueLog {
    fn on_interact(&mut self, payload: &String) {
        self.cues += 1;
        info!(target: "stroll::cue", "open {payload}");
    }

    fn on_close(&mut self) {
        self.cues += 1;
        debug!(target: "stroll::cue", "close");
    }

    fn on_theme_toggle(&mut self) {
        self.cues += 1;
        debug!(target: "stroll::cue", "theme");
    }
}

pub struct Explorer {
    game:    GameConfig,
    world:   ZoneLayout,
    spawn_x: f32,
    session: Option<Session<String, CueLog>>,
}

impl Explorer {
    pub fn new(game: GameConfig, world: ZoneLayout, spawn_x: f32) -> Self {
        Self {
            game,
            world,
            spawn_x,
            session: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.game.clone(), config.world.clone(), config.spawn_x)
    }

    /// The running session; `None` until [`setup`](StrollApp::setup).
    pub fn session(&self) -> Option<&Session<String, CueLog>> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session<String, CueLog>> {
        self.session.as_mut()
    }
}

impl StrollApp for Explorer {
    fn setup(&mut self, ctx: &mut AppContext) {
        self.session = Some(Session::with_events(
            &self.game,
            &self.world,
            ctx.viewport(),
            self.spawn_x,
            CueLog::default(),
        ));
    }

    fn update(&mut self, ctx: &mut AppContext) {
        if let Some(session) = self.session.as_mut() {
            session.update(ctx.input, ctx.dt);
        }
    }

    fn draw(&self, surface: &mut dyn DrawSurface, _ctx: &AppContext) {
        if let Some(session) = self.session.as_ref() {
            session.draw(surface);
        }
    }

    fn on_resize(&mut self, new_size: (u32, u32), _ctx: &mut AppContext) {
        // minimised windows report 0x0
        if new_size.0 == 0 || new_size.1 == 0 {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.rebuild_world(&self.world, Vec2::new(new_size.0 as f32, new_size.1 as f32));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stroll_core::{DrawList, InputState, KeyCode, ZoneSpec};

    fn explorer() -> Explorer {
        let world = ZoneLayout {
            world_width: 2400.0,
            ground_height: 100.0,
            solids: Vec::new(),
            interactives: vec![ZoneSpec {
                id: "kiosk".into(),
                x: 280.0,
                width: 40.0,
                height: 80.0,
                lift: 0.0,
            }],
        };
        let mut game = GameConfig::default();
        game.camera.shake_seed = Some(5);
        Explorer::new(game, world, 300.0)
    }

    #[test]
    fn setup_builds_the_session_for_the_window() {
        let mut app = explorer();
        assert!(app.session().is_none());

        let input = InputState::new();
        let mut ctx = AppContext::new(&input, 0.0, (800, 600));
        app.setup(&mut ctx);

        let session = app.session().unwrap();
        assert_eq!(session.resolver().ground_y(), 500.0);
        assert_eq!(session.body().position.x, 300.0);
    }

    #[test]
    fn interacting_emits_a_cue() {
        let mut app = explorer();
        let mut input = InputState::new();
        app.setup(&mut AppContext::new(&input, 0.0, (800, 600)));

        input.key_down(KeyCode::Enter);
        app.update(&mut AppContext::new(&input, 1.0 / 60.0, (800, 600)));
        input.end_frame();

        let session = app.session().unwrap();
        assert_eq!(session.open_interaction().map(String::as_str), Some("kiosk"));
        assert_eq!(session.events().cues, 1);
    }

    #[test]
    fn resize_relayouts_and_ignores_minimise() {
        let mut app = explorer();
        let input = InputState::new();
        app.setup(&mut AppContext::new(&input, 0.0, (800, 600)));

        app.on_resize((0, 0), &mut AppContext::new(&input, 0.0, (0, 0)));
        assert_eq!(app.session().unwrap().resolver().ground_y(), 500.0);

        app.on_resize((1024, 768), &mut AppContext::new(&input, 0.0, (1024, 768)));
        let session = app.session().unwrap();
        assert_eq!(session.resolver().ground_y(), 668.0);
        assert_eq!(session.body().position.y, 668.0);
    }

    #[test]
    fn draws_nothing_before_setup() {
        let app = explorer();
        let input = InputState::new();
        let mut list = DrawList::new();
        app.draw(&mut list, &AppContext::new(&input, 0.0, (800, 600)));
        assert!(list.is_empty());
    }
}
