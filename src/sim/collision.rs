//! Collision detection for axis-aligned rectangles
//!
//! Everything in the playfield is a box: the entity, and the two solid
//! segments of every obstacle. Overlap tests are strict, so boxes that only
//! share an edge do not collide.

use glam::Vec2;

use super::state::{Entity, Obstacle, TerminalCause};

/// Axis-aligned bounding box (`min` = top-left, `max` = bottom-right)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Open-interval overlap on the x axis
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// Open-interval overlap on the y axis
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.max.y > other.min.y && self.min.y < other.max.y
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Check the entity against the top and bottom edges of the surface
///
/// Touching an edge counts as leaving the surface.
pub fn surface_bounds_hit(entity: &Entity, surface_height: f32) -> Option<TerminalCause> {
    if entity.top() <= 0.0 {
        Some(TerminalCause::Ceiling)
    } else if entity.bottom() >= surface_height {
        Some(TerminalCause::Floor)
    } else {
        None
    }
}

/// Check the entity against both solid segments of an obstacle
pub fn entity_hits_obstacle(entity: &Entity, obstacle: &Obstacle, surface_height: f32) -> bool {
    let bounds = entity.bounds();
    bounds.overlaps(&obstacle.upper_segment())
        || bounds.overlaps(&obstacle.lower_segment(surface_height))
}
