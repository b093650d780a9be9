//! Horizontal smooth-follow camera with screen shake.
//!
//! Each tick the camera moves a fixed fraction of the way toward the point
//! that would centre the target:
//!
//! ```text
//! desired = target_x - viewport_w / 2
//! x      += (desired - x) * smoothing
//! x       = clamp(x, 0, world_w - viewport_w)
//! ```
//!
//! This is a plain exponential approach, not a spring: it never overshoots.
//! Shake is independent of the follow state and only affects the transform
//! applied while drawing the world.

use glam::Vec2;
use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CameraConfig;
use crate::draw::DrawSurface;
use crate::rect::Rect;

/// Countdown state of an active shake.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shake {
    pub intensity: f32,
    pub duration:  f32,
    pub remaining: f32,
    /// Offset produced by the last update; zero once the shake has elapsed.
    pub offset:    Vec2,
}

impl Shake {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    fn advance(&mut self, dt: f32, rng: &mut StdRng) {
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }
        self.remaining = (self.remaining - dt).max(0.0);
        if !self.is_active() {
            self.offset = Vec2::ZERO;
            return;
        }
        // linear decay envelope
        let amplitude = self.intensity * (self.remaining / self.duration);
        self.offset = Vec2::new(
            rng.gen_range(-1.0f32..=1.0) * amplitude,
            rng.gen_range(-1.0f32..=1.0) * amplitude,
        );
    }
}

/// Side-scrolling camera tracking a horizontal target.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    x:           f32,
    smoothing:   f32,
    viewport:    Vec2,
    world_width: f32,
    shake:       Shake,
    rng:         StdRng,
}

impl FollowCamera {
    /// Builds a camera from config; the shake RNG is seeded from
    /// `config.shake_seed` or from entropy.
    pub fn new(config: &CameraConfig, viewport: Vec2, world_width: f32) -> Self {
        let rng = match config.shake_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config.smoothing, viewport, world_width, rng)
    }

    pub fn with_rng(smoothing: f32, viewport: Vec2, world_width: f32, rng: StdRng) -> Self {
        Self {
            x: 0.0,
            smoothing: smoothing.clamp(0.0, 1.0),
            viewport,
            world_width,
            shake: Shake::default(),
            rng,
        }
    }

    /// Left edge of the view in world pixels.
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn world_width(&self) -> f32 {
        self.world_width
    }

    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }

    pub fn shake_state(&self) -> &Shake {
        &self.shake
    }

    pub fn shake_offset(&self) -> Vec2 {
        self.shake.offset
    }

    /// Largest allowed `x`.  Zero when the world is narrower than the view.
    pub fn max_x(&self) -> f32 {
        (self.world_width - self.viewport.x).max(0.0)
    }

    // ── Per-tick ───────────────────────────────────────────────────────────

    /// Ease toward `target_x` and advance the shake countdown.
    pub fn update(&mut self, target_x: f32, dt: f32) {
        let desired = target_x - self.viewport.x * 0.5;
        if desired.is_finite() {
            self.x += (desired - self.x) * self.smoothing;
        }
        self.x = self.x.clamp(0.0, self.max_x());
        self.shake.advance(dt, &mut self.rng);
    }

    /// Centre on `target_x` immediately, without easing.
    pub fn snap_to(&mut self, target_x: f32) {
        let desired = target_x - self.viewport.x * 0.5;
        if desired.is_finite() {
            self.x = desired;
        }
        self.x = self.x.clamp(0.0, self.max_x());
    }

    /// New viewport or world size; the current offset is re-clamped.
    pub fn resize(&mut self, viewport: Vec2, world_width: f32) {
        self.viewport = viewport;
        self.world_width = world_width;
        self.x = self.x.clamp(0.0, self.max_x());
    }

    /// Start a shake of peak displacement `intensity` pixels lasting
    /// `duration` seconds.  Replaces any shake already running.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        if duration <= 0.0 {
            return;
        }
        trace!("camera shake {intensity:.1}px for {duration:.2}s");
        self.shake = Shake {
            intensity,
            duration,
            remaining: duration,
            offset: Vec2::ZERO,
        };
    }

    // ── Drawing ────────────────────────────────────────────────────────────

    /// Run `draw` with the world-to-screen transform applied.
    ///
    /// The transform (scroll plus shake) is pushed with `save` and popped
    /// with `restore` around the closure, so nothing drawn afterwards sees
    /// it.
    pub fn with_world_transform<F>(&self, surface: &mut dyn DrawSurface, draw: F)
    where
        F: FnOnce(&mut dyn DrawSurface),
    {
        surface.save();
        surface.translate(Vec2::new(-self.x, 0.0) + self.shake.offset);
        draw(&mut *surface);
        surface.restore();
    }

    /// The part of the world currently on screen.
    pub fn view_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.viewport.x, self.viewport.y)
    }

    /// `true` if `rect` (world space) overlaps the view.  Used for culling;
    /// never mutates the camera.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        self.view_rect().intersects(rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, DrawList};

    fn camera(world: f32) -> FollowCamera {
        FollowCamera::with_rng(0.08, Vec2::new(800.0, 600.0), world, StdRng::seed_from_u64(7))
    }

    #[test]
    fn eases_toward_centred_target() {
        let mut cam = camera(4000.0);
        cam.update(1000.0, 1.0 / 60.0);
        assert!((cam.x() - 600.0 * 0.08).abs() < 1e-3);

        for _ in 0..500 {
            cam.update(1000.0, 1.0 / 60.0);
        }
        assert!((cam.x() - 600.0).abs() < 0.01);
    }

    #[test]
    fn never_overshoots() {
        let mut cam = camera(4000.0);
        let mut last = cam.x();
        for _ in 0..300 {
            cam.update(1000.0, 1.0 / 60.0);
            assert!(cam.x() >= last && cam.x() <= 600.0);
            last = cam.x();
        }
    }

    #[test]
    fn stays_in_bounds_for_any_target() {
        let targets = [-1.0e6, -100.0, 0.0, 50.0, 2000.0, 3990.0, 4500.0, 1.0e6, f32::NAN];
        for &t in &targets {
            let mut cam = camera(4000.0);
            for _ in 0..200 {
                cam.update(t, 1.0 / 60.0);
                assert!(cam.x() >= 0.0 && cam.x() <= 3200.0, "target {t} -> {}", cam.x());
            }
        }
    }

    #[test]
    fn world_narrower_than_view_pins_to_zero() {
        let mut cam = camera(500.0);
        cam.update(400.0, 1.0 / 60.0);
        assert_eq!(cam.x(), 0.0);
        assert_eq!(cam.max_x(), 0.0);
    }

    #[test]
    fn snap_and_resize_clamp() {
        let mut cam = camera(4000.0);
        cam.snap_to(3900.0);
        assert_eq!(cam.x(), 3200.0);
        cam.resize(Vec2::new(1000.0, 600.0), 3000.0);
        assert_eq!(cam.x(), 2000.0);
    }

    #[test]
    fn shake_decays_to_exactly_zero() {
        let mut cam = camera(4000.0);
        cam.shake(10.0, 0.5);
        cam.update(0.0, 0.125);
        let first = cam.shake_offset();
        // remaining 0.375 of 0.5
        assert!(first.x.abs() <= 7.5 + 1e-4 && first.y.abs() <= 7.5 + 1e-4);
        assert!(cam.shake_state().is_active());

        for _ in 0..3 {
            cam.update(0.0, 0.125);
        }
        assert!(!cam.shake_state().is_active());
        assert_eq!(cam.shake_offset(), Vec2::ZERO);
    }

    #[test]
    fn shake_envelope_shrinks() {
        let mut cam = camera(4000.0);
        cam.shake(20.0, 1.0);
        for i in 1..10 {
            cam.update(0.0, 0.1);
            let bound = 20.0 * (1.0 - i as f32 * 0.1) + 1e-3;
            let o = cam.shake_offset();
            assert!(o.x.abs() <= bound && o.y.abs() <= bound, "tick {i}: {o:?}");
        }
    }

    #[test]
    fn zero_duration_shake_is_ignored() {
        let mut cam = camera(4000.0);
        cam.shake(10.0, 0.0);
        cam.update(0.0, 0.1);
        assert_eq!(cam.shake_offset(), Vec2::ZERO);
    }

    #[test]
    fn world_transform_is_scoped() {
        let mut cam = camera(4000.0);
        cam.snap_to(1400.0);
        cam.shake(5.0, 1.0);
        cam.update(1400.0, 0.016);
        let expected = Vec2::new(-cam.x(), 0.0) + cam.shake_offset();

        let mut list = DrawList::new();
        let tile = Rect::new(0.0, 0.0, 1.0, 1.0);
        cam.with_world_transform(&mut list, |s| s.fill_rect(tile, [1.0; 4]));
        list.fill_rect(tile, [0.0; 4]);

        assert_eq!(list.offset(), Vec2::ZERO);
        assert_eq!(list.depth(), 0);
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Save,
                DrawCommand::Translate(expected),
                DrawCommand::FillRect { rect: tile, rgba: [1.0; 4] },
                DrawCommand::Restore,
                DrawCommand::FillRect { rect: tile, rgba: [0.0; 4] },
            ]
        );
    }

    #[test]
    fn visibility_is_an_overlap_test() {
        let mut cam = camera(4000.0);
        cam.snap_to(1400.0); // view 1000..1800
        assert!(cam.is_visible(&Rect::new(1750.0, 100.0, 100.0, 100.0)));
        assert!(cam.is_visible(&Rect::new(900.0, 100.0, 150.0, 100.0)));
        assert!(!cam.is_visible(&Rect::new(1800.0, 100.0, 100.0, 100.0)));
        assert!(!cam.is_visible(&Rect::new(500.0, 100.0, 100.0, 100.0)));
        assert!(!cam.is_visible(&Rect::new(1200.0, 700.0, 100.0, 100.0)));
        assert_eq!(cam.x(), 1000.0);
    }
}
