//! Static zone geometry and the position constraint built on it.
//!
//! Two independent lists of axis-aligned rectangles: *solid* zones block
//! horizontal movement, *interactive* zones are only ever queried for
//! proximity.  Both are replaced wholesale whenever the world is rebuilt
//! (see [`WorldGeometry`](crate::layout::WorldGeometry)); nothing is patched
//! in place.  Lookups are linear scans, which is fine for the few dozen
//! zones a scene holds.

use log::trace;

use crate::body::KinematicBody;
use crate::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Solid,
    Interactive,
}

/// A rectangle of world geometry with an opaque payload for the caller
/// (a building id, an NPC name, a dialogue key...).
#[derive(Debug, Clone, PartialEq)]
pub struct Zone<P> {
    pub rect: Rect,
    pub kind: ZoneKind,
    pub payload: P,
}

/// Holds the zone sets and the world bounds.
#[derive(Debug, Clone)]
pub struct CollisionResolver<P> {
    solids:       Vec<Zone<P>>,
    interactives: Vec<Zone<P>>,
    world_width:  f32,
    ground_y:     f32,
}

impl<P> CollisionResolver<P> {
    /// Creates an empty resolver for a world `world_width` pixels wide whose
    /// ground line sits at `ground_y`.
    pub fn new(world_width: f32, ground_y: f32) -> Self {
        Self {
            solids: Vec::new(),
            interactives: Vec::new(),
            world_width,
            ground_y,
        }
    }

    pub fn set_bounds(&mut self, world_width: f32, ground_y: f32) {
        self.world_width = world_width;
        self.ground_y = ground_y;
    }

    pub fn world_width(&self) -> f32 {
        self.world_width
    }

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    // ── Geometry ───────────────────────────────────────────────────────────

    /// Drop both zone sets.
    pub fn clear_zones(&mut self) {
        self.solids.clear();
        self.interactives.clear();
    }

    pub fn add_solid_zone(&mut self, rect: Rect, payload: P) {
        self.solids.push(Zone { rect, kind: ZoneKind::Solid, payload });
    }

    pub fn add_interactive_zone(&mut self, rect: Rect, payload: P) {
        self.interactives.push(Zone { rect, kind: ZoneKind::Interactive, payload });
    }

    pub fn solid_zones(&self) -> &[Zone<P>] {
        &self.solids
    }

    pub fn interactive_zones(&self) -> &[Zone<P>] {
        &self.interactives
    }

    // ── Queries ────────────────────────────────────────────────────────────

    /// Keep `body` inside the world and out of every solid zone.
    ///
    /// `x` is first clamped into `[half_width, world_width - half_width]`.
    /// Then each solid zone overlapping the body's span pushes it out through
    /// whichever of its edges is nearer; on a tie the body goes left.  If the
    /// nearer edge would put the body outside the world it exits through the
    /// other one instead.  Passes repeat until nothing overlaps, since one
    /// push can land the body in a neighbouring zone.  When the pushes keep
    /// bouncing between touching zones, the body goes to the closest free
    /// spot next to any solid.  If no free spot exists inside the world, the
    /// clamped position is kept.
    ///
    /// Grounded bodies are pinned to the ground line.  The vertical position
    /// of an airborne body belongs to the integrator and is left alone.
    pub fn constrain_player(&self, body: &mut KinematicBody, half_width: f32) {
        let min_x = half_width;
        let max_x = (self.world_width - half_width).max(min_x);
        let clamped = body.position.x.clamp(min_x, max_x);
        let mut x = clamped;

        for _ in 0..=self.solids.len() {
            let mut moved = false;
            for zone in &self.solids {
                if !zone.rect.overlaps_span(x - half_width, x + half_width) {
                    continue;
                }
                let next = Self::exit_through(&zone.rect, x, half_width, min_x, max_x);
                if next != x {
                    trace!("pushed out of solid zone at {:.1} -> x={next:.1}", zone.rect.x);
                    x = next;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }

        if self.blocked(x, half_width) {
            x = self
                .nearest_free(clamped, half_width, min_x, max_x)
                .unwrap_or(clamped);
            trace!("no clean push-out, settled at x={x:.1}");
        }

        body.position.x = x;
        if body.is_grounded() {
            body.position.y = self.ground_y;
        }
    }

    /// Position just outside `rect`, or `x` unchanged if neither side fits
    /// in `[min_x, max_x]`.
    fn exit_through(rect: &Rect, x: f32, half_width: f32, min_x: f32, max_x: f32) -> f32 {
        let push_left = (x + half_width) - rect.left();
        let push_right = rect.right() - (x - half_width);
        let exit_left = rect.left() - half_width;
        let exit_right = rect.right() + half_width;
        let left_fits = exit_left >= min_x;
        let right_fits = exit_right <= max_x;

        if left_fits && (push_left <= push_right || !right_fits) {
            exit_left
        } else if right_fits {
            exit_right
        } else {
            x
        }
    }

    fn blocked(&self, x: f32, half_width: f32) -> bool {
        self.solids
            .iter()
            .any(|zone| zone.rect.overlaps_span(x - half_width, x + half_width))
    }

    /// Closest solid edge to `origin` where the body fits without touching
    /// any solid's interior; ties go left.
    fn nearest_free(&self, origin: f32, half_width: f32, min_x: f32, max_x: f32) -> Option<f32> {
        self.solids
            .iter()
            .flat_map(|zone| [zone.rect.left() - half_width, zone.rect.right() + half_width])
            .filter(|&c| c >= min_x && c <= max_x && !self.blocked(c, half_width))
            .fold(None, |best: Option<f32>, c| match best {
                Some(b) => {
                    let (db, dc) = ((b - origin).abs(), (c - origin).abs());
                    if dc < db || (dc == db && c < b) {
                        Some(c)
                    } else {
                        Some(b)
                    }
                }
                None => Some(c),
            })
    }

    /// The interactive zone whose centre is horizontally within `range` of
    /// the body and closest to it.  Equal distances keep the zone that was
    /// added first.
    pub fn find_nearby_interactive(&self, body: &KinematicBody, range: f32) -> Option<&Zone<P>> {
        self.nearby_interactive_index(body, range)
            .map(|i| &self.interactives[i])
    }

    /// Index form of [`find_nearby_interactive`](Self::find_nearby_interactive),
    /// valid until the next rebuild.
    pub fn nearby_interactive_index(&self, body: &KinematicBody, range: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, zone) in self.interactives.iter().enumerate() {
            let dist = (zone.rect.center_x() - body.position.x).abs();
            if dist > range {
                continue;
            }
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((i, dist));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::MotionMode;

    const HW: f32 = 12.0;
    const GROUND: f32 = 400.0;

    fn resolver() -> CollisionResolver<&'static str> {
        CollisionResolver::new(2000.0, GROUND)
    }

    fn body_at(x: f32) -> KinematicBody {
        KinematicBody::standing_at(x, GROUND)
    }

    fn overlaps_interior(zone: &Rect, body: &KinematicBody) -> bool {
        let (l, r) = body.span(HW);
        zone.overlaps_span(l, r)
    }

    #[test]
    fn clamps_into_world() {
        let r = resolver();
        let mut b = body_at(-50.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, HW);

        let mut b = body_at(5000.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 2000.0 - HW);
    }

    #[test]
    fn never_left_inside_a_solid() {
        let mut r = resolver();
        let wall = Rect::new(300.0, 200.0, 100.0, 200.0);
        r.add_solid_zone(wall, "wall");

        let mut x = 270.0;
        while x <= 430.0 {
            let mut b = body_at(x);
            r.constrain_player(&mut b, HW);
            assert!(!overlaps_interior(&wall, &b), "x={x} ended at {}", b.position.x);
            x += 0.5;
        }
    }

    #[test]
    fn pushes_to_nearer_edge() {
        let mut r = resolver();
        r.add_solid_zone(Rect::new(300.0, 0.0, 100.0, 400.0), "wall");

        let mut b = body_at(310.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 300.0 - HW);

        let mut b = body_at(395.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 400.0 + HW);
    }

    #[test]
    fn tie_goes_left() {
        let mut r = resolver();
        r.add_solid_zone(Rect::new(300.0, 0.0, 100.0, 400.0), "wall");
        let mut b = body_at(350.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 300.0 - HW);
    }

    #[test]
    fn zone_against_world_edge_pushes_inward() {
        let mut r = resolver();
        r.add_solid_zone(Rect::new(0.0, 0.0, 100.0, 400.0), "cliff");
        let mut b = body_at(30.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 100.0 + HW);
    }

    #[test]
    fn touching_solids_never_trap_the_body() {
        let mut r = resolver();
        let a = Rect::new(300.0, 0.0, 100.0, 400.0);
        let b = Rect::new(400.0, 0.0, 100.0, 400.0);
        r.add_solid_zone(a, "a");
        r.add_solid_zone(b, "b");

        let mut body = body_at(410.0);
        r.constrain_player(&mut body, HW);
        assert!(!overlaps_interior(&a, &body), "ended at {}", body.position.x);
        assert!(!overlaps_interior(&b, &body), "ended at {}", body.position.x);

        let mut x = 280.0;
        while x <= 520.0 {
            let mut body = body_at(x);
            r.constrain_player(&mut body, HW);
            assert!(
                !overlaps_interior(&a, &body) && !overlaps_interior(&b, &body),
                "x={x} ended at {}",
                body.position.x
            );
            x += 0.5;
        }
    }

    #[test]
    fn overlapping_solids_push_clear_of_both() {
        let mut r = resolver();
        let a = Rect::new(300.0, 0.0, 120.0, 400.0);
        let b = Rect::new(380.0, 0.0, 120.0, 400.0);
        r.add_solid_zone(a, "a");
        r.add_solid_zone(b, "b");

        let mut body = body_at(400.0);
        r.constrain_player(&mut body, HW);
        assert!(!overlaps_interior(&a, &body));
        assert!(!overlaps_interior(&b, &body));
        assert_eq!(body.position.x, 300.0 - HW);
    }

    #[test]
    fn solid_filling_the_world_keeps_body_in_bounds() {
        let mut r = CollisionResolver::new(500.0, GROUND);
        r.add_solid_zone(Rect::new(0.0, 0.0, 500.0, 400.0), "floodwall");

        for &x in &[-40.0, 0.0, 200.0, 499.0, 900.0] {
            let mut body = body_at(x);
            r.constrain_player(&mut body, HW);
            assert!(
                body.position.x >= HW && body.position.x <= 500.0 - HW,
                "x={x} ended at {}",
                body.position.x
            );
        }
    }

    #[test]
    fn touching_edge_is_not_pushed() {
        let mut r = resolver();
        r.add_solid_zone(Rect::new(300.0, 0.0, 100.0, 400.0), "wall");
        let mut b = body_at(300.0 - HW);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 300.0 - HW);
    }

    #[test]
    fn grounded_is_pinned_airborne_is_not() {
        let r = resolver();
        let mut b = body_at(500.0);
        b.position.y = 123.0;
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.y, GROUND);

        let mut b = body_at(500.0);
        b.mode = MotionMode::Airborne;
        b.position.y = 320.0;
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.y, 320.0);
    }

    #[test]
    fn nearby_picks_the_closest_in_range() {
        let mut r = resolver();
        r.add_interactive_zone(Rect::new(100.0, 0.0, 40.0, 40.0), "far");
        r.add_interactive_zone(Rect::new(180.0, 0.0, 40.0, 40.0), "near");
        r.add_interactive_zone(Rect::new(900.0, 0.0, 40.0, 40.0), "out of range");

        let b = body_at(190.0);
        let zone = r.find_nearby_interactive(&b, 80.0).map(|z| z.payload);
        assert_eq!(zone, Some("near"));

        let b = body_at(600.0);
        assert!(r.find_nearby_interactive(&b, 80.0).is_none());
    }

    #[test]
    fn nearby_ties_keep_encounter_order() {
        let mut r = resolver();
        r.add_interactive_zone(Rect::new(80.0, 0.0, 40.0, 40.0), "first");
        r.add_interactive_zone(Rect::new(180.0, 0.0, 40.0, 40.0), "second");
        let b = body_at(150.0);
        let zone = r.find_nearby_interactive(&b, 60.0).map(|z| z.payload);
        assert_eq!(zone, Some("first"));
    }

    #[test]
    fn interactive_zones_do_not_block() {
        let mut r = resolver();
        r.add_interactive_zone(Rect::new(300.0, 0.0, 100.0, 400.0), "door");
        let mut b = body_at(350.0);
        r.constrain_player(&mut b, HW);
        assert_eq!(b.position.x, 350.0);
    }

    #[test]
    fn clear_zones_drops_both_sets() {
        let mut r = resolver();
        r.add_solid_zone(Rect::new(0.0, 0.0, 1.0, 1.0), "a");
        r.add_interactive_zone(Rect::new(0.0, 0.0, 1.0, 1.0), "b");
        r.clear_zones();
        assert!(r.solid_zones().is_empty());
        assert!(r.interactive_zones().is_empty());
    }
}
