//! Static world layout.
//!
//! Zone coordinates are configuration, not simulation: a [`WorldGeometry`]
//! turns them into concrete rectangles for the current viewport and feeds
//! them to the [`CollisionResolver`].  Rebuilds always clear and re-add the
//! whole set.

use glam::Vec2;
use log::debug;
use serde::Deserialize;

use crate::collision::CollisionResolver;
use crate::rect::Rect;

/// World extent for a given viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub world_width: f32,
    pub ground_y:    f32,
}

/// Supplies the solid and interactive zones of a world.
pub trait WorldGeometry<P> {
    /// World width and ground line for `viewport`.
    fn bounds(&self, viewport: Vec2) -> WorldBounds;

    /// Add every zone for `bounds` to `resolver`, which has just been cleared.
    fn populate(&self, bounds: &WorldBounds, resolver: &mut CollisionResolver<P>);
}

/// Replace the resolver's contents with `geometry` laid out for `viewport`.
pub fn rebuild<P, G>(geometry: &G, viewport: Vec2, resolver: &mut CollisionResolver<P>) -> WorldBounds
where
    G: WorldGeometry<P> + ?Sized,
{
    let bounds = geometry.bounds(viewport);
    resolver.clear_zones();
    resolver.set_bounds(bounds.world_width, bounds.ground_y);
    geometry.populate(&bounds, resolver);
    debug!(
        "world rebuilt: {} solid, {} interactive, width {:.0}, ground {:.0}",
        resolver.solid_zones().len(),
        resolver.interactive_zones().len(),
        bounds.world_width,
        bounds.ground_y
    );
    bounds
}

// ─── Data-driven layout ────────────────────────────────────────────────────

/// One zone anchored to the ground line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ZoneSpec {
    pub id: String,
    /// Left edge in world pixels.
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Gap between the ground line and the zone's bottom edge.
    #[serde(default)]
    pub lift: f32,
}

impl ZoneSpec {
    fn rect(&self, ground_y: f32) -> Rect {
        Rect::new(self.x, ground_y - self.lift - self.height, self.width, self.height)
    }
}

/// A world described as plain data, typically loaded from TOML.
///
/// ```toml
/// world_width = 6000.0
/// ground_height = 120.0
///
/// [[solids]]
/// id = "fountain"
/// x = 1400.0
/// width = 90.0
/// height = 60.0
///
/// [[interactives]]
/// id = "bakery"
/// x = 800.0
/// width = 160.0
/// height = 140.0
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ZoneLayout {
    pub world_width: f32,
    /// Distance from the bottom of the viewport up to the ground line.
    pub ground_height: f32,
    pub solids: Vec<ZoneSpec>,
    pub interactives: Vec<ZoneSpec>,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            world_width: 4000.0,
            ground_height: 120.0,
            solids: Vec::new(),
            interactives: Vec::new(),
        }
    }
}

impl WorldGeometry<String> for ZoneLayout {
    fn bounds(&self, viewport: Vec2) -> WorldBounds {
        WorldBounds {
            world_width: self.world_width,
            ground_y: (viewport.y - self.ground_height).max(0.0),
        }
    }

    fn populate(&self, bounds: &WorldBounds, resolver: &mut CollisionResolver<String>) {
        for spec in &self.solids {
            resolver.add_solid_zone(spec.rect(bounds.ground_y), spec.id.clone());
        }
        for spec in &self.interactives {
            resolver.add_interactive_zone(spec.rect(bounds.ground_y), spec.id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ZoneLayout {
        ZoneLayout {
            world_width: 3000.0,
            ground_height: 100.0,
            solids: vec![ZoneSpec {
                id: "well".into(),
                x: 500.0,
                width: 60.0,
                height: 40.0,
                lift: 0.0,
            }],
            interactives: vec![ZoneSpec {
                id: "sign".into(),
                x: 900.0,
                width: 20.0,
                height: 50.0,
                lift: 10.0,
            }],
        }
    }

    #[test]
    fn zones_sit_on_the_ground_line() {
        let mut resolver = CollisionResolver::new(0.0, 0.0);
        let bounds = rebuild(&layout(), Vec2::new(800.0, 600.0), &mut resolver);
        assert_eq!(bounds.ground_y, 500.0);
        assert_eq!(resolver.world_width(), 3000.0);
        assert_eq!(resolver.solid_zones()[0].rect, Rect::new(500.0, 460.0, 60.0, 40.0));
        assert_eq!(resolver.interactive_zones()[0].rect, Rect::new(900.0, 440.0, 20.0, 50.0));
    }

    #[test]
    fn rebuild_replaces_rather_than_appends() {
        let mut resolver = CollisionResolver::new(0.0, 0.0);
        rebuild(&layout(), Vec2::new(800.0, 600.0), &mut resolver);
        rebuild(&layout(), Vec2::new(1024.0, 768.0), &mut resolver);
        assert_eq!(resolver.solid_zones().len(), 1);
        assert_eq!(resolver.interactive_zones().len(), 1);
        assert_eq!(resolver.ground_y(), 668.0);
    }
}
