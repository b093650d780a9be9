//! One explorable scene: the player body, the world it walks through and
//! the camera following it.
//!
//! [`Session::update`] is the whole simulation tick.  The order matters:
//!
//! 1. an open interaction swallows movement and listens for close/interact
//! 2. the integrator moves the body and the resolver constrains it
//! 3. the camera chases the *constrained* position
//! 4. the nearby interactive zone is looked up from that same position
//!
//! Swapping 2 and 3 makes the camera chase a point inside a wall for a
//! frame, which shows up as jitter.

use glam::Vec2;
use log::{debug, info};

use crate::body::KinematicBody;
use crate::camera::FollowCamera;
use crate::collision::{CollisionResolver, Zone};
use crate::config::{GameConfig, InteractionConfig};
use crate::draw::DrawSurface;
use crate::input::InputState;
use crate::layout::{self, WorldGeometry};
use crate::motion::{MotionEvents, MotionIntegrator, MoveIntent, NoEvents};
use crate::rect::Rect;

// ─── Events ────────────────────────────────────────────────────────────────

/// Scene-level notifications, on top of the movement ones.
#[allow(unused_variables)]
pub trait GameEvents<P>: MotionEvents {
    /// The player opened the interactive zone carrying `payload`.
    fn on_interact(&mut self, payload: &P) {}

    /// The open interaction was dismissed.
    fn on_close(&mut self) {}

    /// The colour theme flipped.
    fn on_theme_toggle(&mut self) {}
}

impl<P> GameEvents<P> for NoEvents {}

// ─── Theme ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    fn palette(self) -> Palette {
        match self {
            Theme::Day => Palette {
                sky:         [0.62, 0.82, 0.95, 1.0],
                ground:      [0.45, 0.62, 0.33, 1.0],
                solid:       [0.55, 0.47, 0.40, 1.0],
                interactive: [0.85, 0.66, 0.35, 1.0],
                highlight:   [1.00, 0.84, 0.45, 1.0],
                player:      [0.20, 0.25, 0.45, 1.0],
            },
            Theme::Night => Palette {
                sky:         [0.07, 0.09, 0.18, 1.0],
                ground:      [0.16, 0.22, 0.15, 1.0],
                solid:       [0.25, 0.22, 0.24, 1.0],
                interactive: [0.48, 0.38, 0.22, 1.0],
                highlight:   [0.95, 0.78, 0.35, 1.0],
                player:      [0.78, 0.80, 0.92, 1.0],
            },
        }
    }
}

struct Palette {
    sky:         [f32; 4],
    ground:      [f32; 4],
    solid:       [f32; 4],
    interactive: [f32; 4],
    highlight:   [f32; 4],
    player:      [f32; 4],
}

// ─── Session ───────────────────────────────────────────────────────────────

pub struct Session<P, E = NoEvents> {
    resolver:    CollisionResolver<P>,
    motion:      MotionIntegrator<E>,
    camera:      FollowCamera,
    interaction: InteractionConfig,
    /// Index into the resolver's interactive zones, refreshed every tick.
    nearby:      Option<usize>,
    open:        Option<P>,
    theme:       Theme,
}

impl<P: Clone> Session<P, NoEvents> {
    pub fn new<G>(config: &GameConfig, geometry: &G, viewport: Vec2, spawn_x: f32) -> Self
    where
        G: WorldGeometry<P> + ?Sized,
    {
        Self::with_events(config, geometry, viewport, spawn_x, NoEvents)
    }
}

impl<P: Clone, E: GameEvents<P>> Session<P, E> {
    /// Lays out `geometry` for `viewport`, stands the player at `spawn_x`
    /// and centres the camera on them.
    pub fn with_events<G>(
        config: &GameConfig,
        geometry: &G,
        viewport: Vec2,
        spawn_x: f32,
        events: E,
    ) -> Self
    where
        G: WorldGeometry<P> + ?Sized,
    {
        let mut resolver = CollisionResolver::new(0.0, 0.0);
        let bounds = layout::rebuild(geometry, viewport, &mut resolver);

        let mut body = KinematicBody::standing_at(spawn_x, bounds.ground_y);
        resolver.constrain_player(&mut body, config.motion.half_width);

        let mut camera = FollowCamera::new(&config.camera, viewport, bounds.world_width);
        camera.snap_to(body.position.x);

        info!(
            "session started at x={:.0} in a {:.0}px world",
            body.position.x, bounds.world_width
        );

        Self {
            resolver,
            motion: MotionIntegrator::with_events(config.motion.clone(), body, events),
            camera,
            interaction: config.interaction.clone(),
            nearby: None,
            open: None,
            theme: Theme::default(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn body(&self) -> &KinematicBody {
        self.motion.body()
    }

    pub fn motion(&self) -> &MotionIntegrator<E> {
        &self.motion
    }

    pub fn resolver(&self) -> &CollisionResolver<P> {
        &self.resolver
    }

    pub fn camera(&self) -> &FollowCamera {
        &self.camera
    }

    /// Mutable camera, e.g. to start a shake.
    pub fn camera_mut(&mut self) -> &mut FollowCamera {
        &mut self.camera
    }

    pub fn events(&self) -> &E {
        self.motion.events()
    }

    pub fn events_mut(&mut self) -> &mut E {
        self.motion.events_mut()
    }

    /// The interactive zone the player is standing near, as of the last tick.
    pub fn nearby(&self) -> Option<&Zone<P>> {
        self.nearby.and_then(|i| self.resolver.interactive_zones().get(i))
    }

    /// Payload of the interaction currently open, if any.
    pub fn open_interaction(&self) -> Option<&P> {
        self.open.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    // ── Tick ───────────────────────────────────────────────────────────────

    /// Advance the scene by `dt` seconds.  Does not touch the input edges;
    /// the caller ends the input frame after rendering.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let mut consumed_interact = false;
        let intent = if self.open.is_some() {
            if input.close_pressed() || input.interact_pressed() {
                self.close_interaction();
                consumed_interact = true;
            }
            // still integrated so a jump in flight comes down
            MoveIntent::IDLE
        } else {
            MoveIntent::from_input(input)
        };

        if input.theme_toggle_pressed() {
            self.theme = self.theme.toggled();
            debug!("theme -> {:?}", self.theme);
            <E as GameEvents<P>>::on_theme_toggle(self.motion.events_mut());
        }

        self.motion.step(intent, dt, &self.resolver);

        let x = self.motion.body().position.x;
        self.camera.update(x, dt);

        self.nearby = self
            .resolver
            .nearby_interactive_index(self.motion.body(), self.interaction.range);

        if self.open.is_none() && !consumed_interact && input.interact_pressed() {
            if let Some(zone) = self.nearby() {
                let payload = zone.payload.clone();
                debug!("interaction opened");
                self.motion.events_mut().on_interact(&payload);
                self.open = Some(payload);
            }
        }
    }

    /// Dismiss the open interaction, if there is one.
    pub fn close_interaction(&mut self) {
        if self.open.take().is_some() {
            debug!("interaction closed");
            <E as GameEvents<P>>::on_close(self.motion.events_mut());
        }
    }

    /// Re-lay the world for a new viewport.  Zones are replaced wholesale,
    /// the body is re-constrained into the new bounds and the camera snaps
    /// to it.
    pub fn rebuild_world<G>(&mut self, geometry: &G, viewport: Vec2)
    where
        G: WorldGeometry<P> + ?Sized,
    {
        let bounds = layout::rebuild(geometry, viewport, &mut self.resolver);
        let half_width = self.motion.config().half_width;
        let body = self.motion.body_mut();
        if body.is_grounded() {
            body.position.y = bounds.ground_y;
        } else {
            body.position.y = body.position.y.min(bounds.ground_y);
        }
        self.resolver.constrain_player(body, half_width);

        self.camera.resize(viewport, bounds.world_width);
        self.camera.snap_to(body.position.x);
        self.nearby = None;
    }

    // ── Drawing ────────────────────────────────────────────────────────────

    /// Flat-colour rendition of the scene: sky, ground, the zones on screen
    /// and the player, squashed by the current squash factor.
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let palette = self.theme.palette();
        let viewport = self.camera.viewport();
        let ground_y = self.resolver.ground_y();

        surface.fill_rect(Rect::new(0.0, 0.0, viewport.x, viewport.y), palette.sky);

        self.camera.with_world_transform(surface, |s| {
            let world = self.resolver.world_width();
            s.fill_rect(Rect::new(0.0, ground_y, world, viewport.y - ground_y), palette.ground);

            for zone in self.resolver.solid_zones() {
                if self.camera.is_visible(&zone.rect) {
                    s.fill_rect(zone.rect, palette.solid);
                }
            }
            for (i, zone) in self.resolver.interactive_zones().iter().enumerate() {
                if self.camera.is_visible(&zone.rect) {
                    let colour = if self.nearby == Some(i) {
                        palette.highlight
                    } else {
                        palette.interactive
                    };
                    s.fill_rect(zone.rect, colour);
                }
            }

            s.fill_rect(self.player_rect(), palette.player);
        });
    }

    /// Player sprite bounds, feet on `position.y`.  Positive squash
    /// flattens, negative stretches.
    pub fn player_rect(&self) -> Rect {
        const HEIGHT: f32 = 40.0;
        let body = self.motion.body();
        let half_width = self.motion.config().half_width;
        let width = 2.0 * half_width * (1.0 + body.squash);
        let height = HEIGHT * (1.0 - body.squash);
        Rect::new(
            body.position.x - width * 0.5,
            body.position.y - height,
            width,
            height,
        )
    }
}
