//! Headless core of a side-scrolling exploration game.
//!
//! Everything here is platform-free: the frame pump, the audio layer, the
//! world layout and the drawing surface are all handed in by the caller.
//!
//! ```rust,ignore
//! use stroll_core::{GameConfig, InputState, Session, Vec2, ZoneLayout};
//!
//! let layout = ZoneLayout::default();
//! let mut session = Session::new(&GameConfig::default(), &layout, Vec2::new(800.0, 600.0), 200.0);
//! let mut input = InputState::new();
//!
//! session.update(&input, 1.0 / 60.0);
//! input.end_frame();
//! ```

pub mod body;
pub mod camera;
pub mod collision;
pub mod config;
pub mod draw;
pub mod input;
pub mod layout;
pub mod motion;
pub mod rect;
pub mod scheduler;
pub mod session;
pub mod time;

pub use body::{KinematicBody, MotionMode};
pub use camera::{FollowCamera, Shake};
pub use collision::{CollisionResolver, Zone, ZoneKind};
pub use config::{CameraConfig, GameConfig, InteractionConfig, MotionConfig};
pub use draw::{DrawCommand, DrawList, DrawSurface};
pub use input::{Action, InputState, KeyBindings, KeyCode, TouchButton};
pub use layout::{WorldBounds, WorldGeometry, ZoneLayout, ZoneSpec};
pub use motion::{MotionEvents, MotionIntegrator, MoveIntent, NoEvents};
pub use rect::Rect;
pub use scheduler::{FrameRequester, Scheduler};
pub use session::{GameEvents, Session, Theme};
pub use time::{FrameClock, Instant, Time, MAX_DELTA};

// glam re-export so callers don't need a direct dependency
pub use glam;
pub use glam::Vec2;
