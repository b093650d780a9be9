//! Tuning parameters for the simulation.
//!
//! Every struct deserialises with `#[serde(default)]`, so a config file only
//! needs to name the values it changes:
//!
//! ```toml
//! [motion]
//! walk_speed = 220.0
//!
//! [camera]
//! smoothing = 0.12
//! ```

use serde::Deserialize;

/// Player movement feel.
///
/// Screen coordinates: `y` grows downwards, so `jump_force` is negative.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Grounded horizontal speed in px/s.
    pub walk_speed: f32,
    /// Multiplier applied to `walk_speed` while sprinting.
    pub sprint_multiplier: f32,
    /// Initial vertical velocity of a jump in px/s.
    pub jump_force: f32,
    /// Downward acceleration in px/s².
    pub gravity: f32,
    /// Half the player's collision width in px.
    pub half_width: f32,
    /// Squash value set on take-off (negative stretches).
    pub jump_squash: f32,
    /// Squash value set on landing.
    pub land_squash: f32,
    /// Per-tick multiplier applied to the squash value.
    pub squash_decay: f32,
    /// Seconds between footsteps while walking.
    pub step_interval: f32,
    /// Seconds between footsteps while sprinting.
    pub sprint_step_interval: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed:           180.0,
            sprint_multiplier:    1.8,
            jump_force:           -380.0,
            gravity:              900.0,
            half_width:           12.0,
            jump_squash:          -0.25,
            land_squash:          0.35,
            squash_decay:         0.85,
            step_interval:        0.3,
            sprint_step_interval: 0.18,
        }
    }
}

impl MotionConfig {
    /// Footstep cadence for the current gait.
    #[inline]
    pub fn step_interval_for(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.sprint_step_interval
        } else {
            self.step_interval
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fraction of the remaining distance covered each tick (0..=1).
    pub smoothing: f32,
    /// Seed for the shake RNG; `None` seeds from entropy.
    pub shake_seed: Option<u64>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { smoothing: 0.08, shake_seed: None }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Horizontal distance from a zone's centre within which it can be used.
    pub range: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { range: 60.0 }
    }
}

/// All simulation tunables.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub motion: MotionConfig,
    pub camera: CameraConfig,
    pub interaction: InteractionConfig,
}
