//! Frame timing utilities.
//!
//! `Time` is produced once per tick by the [`FrameClock`] owned by the
//! [`Scheduler`](crate::scheduler::Scheduler) and handed to every update and
//! render callback as its `dt`.  Game code never advances the clock itself.
//!
//! # Example
//! ```rust,ignore
//! scheduler.on_update(|game: &mut Game, dt| {
//!     // Walk at 180 px/s regardless of frame rate
//!     game.x += 180.0 * dt;
//! });
//! ```

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Upper bound on a single tick's `dt`, in seconds.
///
/// A process that is suspended and resumed (backgrounded tab, debugger
/// break) would otherwise feed a multi-second step into the integrator.
pub const MAX_DELTA: f32 = 0.1;

/// Length of the window the FPS counter averages over.
const FPS_WINDOW: f32 = 1.0;

/// A snapshot of timing information for the current tick.
///
/// `Copy`, so callbacks can stash one locally if they need to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the previous tick, clamped to [`MAX_DELTA`].
    pub delta: f32,

    /// Total seconds elapsed since the clock was created.
    pub elapsed: f64,

    /// Number of ticks produced so far (0 for the first tick).
    pub frame_count: u64,

    /// Frames per second over the last completed one-second window.
    pub fps: f32,
}

impl Time {
    /// Returns the delta time clamped to `[0, max_dt]`.
    #[inline]
    pub fn clamped_delta(&self, max_dt: f32) -> f32 {
        self.delta.clamp(0.0, max_dt)
    }
}

// ─── Clock ─────────────────────────────────────────────────────────────────

/// Stateful timer that produces [`Time`] snapshots.
///
/// Holds the last-tick timestamp, the running frame counter and the
/// one-second FPS accumulator.  Timestamps are passed in explicitly so the
/// scheduler can be driven from the platform's frame callback and from
/// tests with synthetic instants alike.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start:       Instant,
    last_tick:   Instant,
    frame_count: u64,
    fps_accum:   f32,
    fps_frames:  u32,
    fps:         f32,
}

impl FrameClock {
    /// Create a new clock whose epoch is `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            start:       now,
            last_tick:   now,
            frame_count: 0,
            fps_accum:   0.0,
            fps_frames:  0,
            fps:         0.0,
        }
    }

    /// Forget the previous timestamp so the next tick measures from `now`.
    ///
    /// Called when the scheduler restarts after a stop; the stopped interval
    /// must not show up as one giant step.
    pub fn reset(&mut self, now: Instant) {
        self.last_tick = now;
        self.fps_accum = 0.0;
        self.fps_frames = 0;
    }

    /// Return the [`Time`] snapshot for `now` without advancing the clock.
    pub fn peek(&self, now: Instant) -> Time {
        Time {
            delta:       clamp_delta(now.saturating_duration_since(self.last_tick)),
            elapsed:     now.saturating_duration_since(self.start).as_secs_f64(),
            frame_count: self.frame_count,
            fps:         self.fps,
        }
    }

    /// Advance by one tick and return its snapshot.
    pub fn tick(&mut self, now: Instant) -> Time {
        let raw = now.saturating_duration_since(self.last_tick);
        let delta = clamp_delta(raw);

        // the FPS window measures wall time, not the clamped step
        self.fps_accum += raw.as_secs_f32();
        self.fps_frames += 1;
        if self.fps_accum >= FPS_WINDOW {
            self.fps = self.fps_frames as f32 / self.fps_accum;
            self.fps_accum = 0.0;
            self.fps_frames = 0;
        }

        let time = Time {
            delta,
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
            frame_count: self.frame_count,
            fps: self.fps,
        };

        self.last_tick = now;
        self.frame_count += 1;
        time
    }

    /// Number of ticks produced so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[inline]
fn clamp_delta(raw: Duration) -> f32 {
    raw.as_secs_f32().min(MAX_DELTA)
}
