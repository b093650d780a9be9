//! The player's kinematic state.

use glam::Vec2;

/// The two kinematic modes of the player body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionMode {
    /// Resting on the ground plane; `y` is pinned to ground level.
    #[default]
    Grounded,
    /// Following a jump arc under gravity.
    Airborne,
}

/// Position, velocity and mode of the player.
///
/// `position` is the feet-centre point in world pixels.  Mutated once per
/// tick by the [`MotionIntegrator`](crate::motion::MotionIntegrator); the
/// camera and renderers only read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mode: MotionMode,
    /// Set on take-off, cleared on landing.
    pub jumping: bool,
    /// Presentation-only squash/stretch scalar; decays every tick.
    pub squash: f32,
    /// `1.0` facing right, `-1.0` facing left.
    pub facing: f32,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            mode: MotionMode::Grounded,
            jumping: false,
            squash: 0.0,
            facing: 1.0,
        }
    }
}

impl KinematicBody {
    /// A grounded body standing at `x` on the ground line `ground_y`.
    pub fn standing_at(x: f32, ground_y: f32) -> Self {
        Self {
            position: Vec2::new(x, ground_y),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.mode == MotionMode::Grounded
    }

    /// Horizontal extent `(left, right)` for a body of the given half width.
    #[inline]
    pub fn span(&self, half_width: f32) -> (f32, f32) {
        (self.position.x - half_width, self.position.x + half_width)
    }
}
