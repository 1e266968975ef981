//! Axis-aligned box collider used for arena walls.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Closest point of the box to `point`; `point` itself when inside.
    pub fn closest_point(&self, position: Vec2, point: Vec2) -> Vec2 {
        let (min, max) = self.aabb(position);
        point.clamp(min, max)
    }

    /// Distance from `point` to the box surface, zero when inside.
    pub fn distance_to_point(&self, position: Vec2, point: Vec2) -> f32 {
        point.distance(self.closest_point(position, point))
    }

    /// Circle vs box overlap.
    pub fn overlaps_circle(&self, position: Vec2, center: Vec2, radius: f32) -> bool {
        self.distance_to_point(position, center) <= radius
    }

    /// Slab test for the segment `from -> to`.
    ///
    /// Returns the fraction along the segment where it first enters the box,
    /// `0.0` when `from` is already inside.
    pub fn segment_entry(&self, position: Vec2, from: Vec2, to: Vec2) -> Option<f32> {
        let (min, max) = self.aabb(position);
        let delta = to - from;
        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        for axis in 0..2 {
            let (o, d, lo, hi) = (from[axis], delta[axis], min[axis], max[axis]);
            if d.abs() <= f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let (mut t0, mut t1) = ((lo - o) * inv, (hi - o) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}
