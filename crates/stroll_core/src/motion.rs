//! Player physics: the grounded/airborne state machine.
//!
//! ## Model
//!
//! * **Grounded**: horizontal velocity is *set* from the current input each
//!   tick (walk speed, times the sprint multiplier when sprinting); there is
//!   no acceleration or friction curve.  A jump edge launches the body.
//! * **Airborne**: semi-implicit Euler, once per tick:
//!   `vy += gravity * dt; y += vy * dt`, so the arc depends slightly on
//!   the frame rate.  Reaching the ground line lands the body.
//!
//! After integrating, the proposed position is handed to the
//! [`CollisionResolver`] which clamps it to the world and pushes it out of
//! solid zones.  Horizontal input keeps steering the body in the air.

use log::debug;

use crate::body::{KinematicBody, MotionMode};
use crate::collision::CollisionResolver;
use crate::config::MotionConfig;
use crate::input::InputState;

// ─── Event sink ────────────────────────────────────────────────────────────

/// Fire-and-forget notifications emitted by the integrator.
///
/// Every method defaults to doing nothing, so a sink only overrides what it
/// cares about (typically the audio layer playing a sound).  Use
/// [`NoEvents`] when nobody is listening.
#[allow(unused_variables)]
pub trait MotionEvents {
    /// The body left the ground.
    fn on_jump(&mut self) {}

    /// The body touched down after a jump.
    fn on_land(&mut self) {}

    /// A footstep fell due while walking or sprinting on the ground.
    fn on_step(&mut self, sprinting: bool) {}
}

/// Sink that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEvents;

impl MotionEvents for NoEvents {}

// ─── Intent ────────────────────────────────────────────────────────────────

/// The slice of input the integrator consumes for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent {
    /// `-1.0` left, `0.0` idle, `1.0` right.
    pub axis: f32,
    pub sprint: bool,
    /// Edge-triggered: true only on the tick the jump was pressed.
    pub jump: bool,
}

impl MoveIntent {
    pub const IDLE: Self = Self { axis: 0.0, sprint: false, jump: false };

    pub fn from_input(input: &InputState) -> Self {
        Self {
            axis: input.axis(),
            sprint: input.sprint(),
            jump: input.jump_pressed(),
        }
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.axis != 0.0
    }
}

// ─── Integrator ────────────────────────────────────────────────────────────

/// Owns the player's [`KinematicBody`] and advances it once per tick.
#[derive(Debug, Clone)]
pub struct MotionIntegrator<E = NoEvents> {
    body:       KinematicBody,
    config:     MotionConfig,
    events:     E,
    step_timer: f32,
}

impl MotionIntegrator<NoEvents> {
    /// An integrator whose notifications go nowhere.
    pub fn new(config: MotionConfig, body: KinematicBody) -> Self {
        Self::with_events(config, body, NoEvents)
    }
}

impl<E: MotionEvents> MotionIntegrator<E> {
    pub fn with_events(config: MotionConfig, body: KinematicBody, events: E) -> Self {
        Self { body, config, events, step_timer: 0.0 }
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Direct access for teleports and world rebuilds.
    pub fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Seconds accumulated toward the next footstep.
    pub fn step_timer(&self) -> f32 {
        self.step_timer
    }

    /// Advance one tick reading intent straight from `input`.
    pub fn update<P>(&mut self, input: &InputState, dt: f32, resolver: &CollisionResolver<P>) {
        self.step(MoveIntent::from_input(input), dt, resolver);
    }

    /// Advance one tick with an explicit intent, then constrain the result.
    pub fn step<P>(&mut self, intent: MoveIntent, dt: f32, resolver: &CollisionResolver<P>) {
        let cfg = &self.config;
        let body = &mut self.body;

        body.squash *= cfg.squash_decay;

        let speed = if intent.sprint {
            cfg.walk_speed * cfg.sprint_multiplier
        } else {
            cfg.walk_speed
        };
        body.velocity.x = intent.axis * speed;
        if intent.is_moving() {
            body.facing = intent.axis.signum();
        }

        if body.mode == MotionMode::Grounded && intent.jump {
            body.velocity.y = cfg.jump_force;
            body.mode = MotionMode::Airborne;
            body.jumping = true;
            body.squash = cfg.jump_squash;
            debug!("take-off at x={:.1}", body.position.x);
            self.events.on_jump();
        }

        body.position.x += body.velocity.x * dt;

        if body.mode == MotionMode::Airborne {
            body.velocity.y += cfg.gravity * dt;
            body.position.y += body.velocity.y * dt;

            let ground = resolver.ground_y();
            if body.position.y >= ground {
                body.position.y = ground;
                body.velocity.y = 0.0;
                body.mode = MotionMode::Grounded;
                body.jumping = false;
                body.squash = cfg.land_squash;
                debug!("landed at x={:.1}", body.position.x);
                self.events.on_land();
            }
        }

        resolver.constrain_player(body, cfg.half_width);

        if body.mode == MotionMode::Grounded && intent.is_moving() {
            self.step_timer += dt;
            let interval = cfg.step_interval_for(intent.sprint);
            if self.step_timer >= interval {
                self.step_timer -= interval;
                self.events.on_step(intent.sprint);
            }
        } else {
            self.step_timer = 0.0;
        }
    }
}
