//! Heading of an entity in degrees.
//!
//! Heading 0° faces +Y ("up" is forward) and positive angles turn
//! counter-clockwise, so the facing vector is `(-sin θ, cos θ)`. Converting a
//! direction back to a heading subtracts 90° from its `atan2` angle.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub degrees: f32,
}

impl Rotation {
    pub fn new(degrees: f32) -> Self {
        Self {
            degrees: normalize_degrees(degrees),
        }
    }

    /// Build a rotation that faces along `dir`. A zero vector faces up.
    pub fn facing_direction(dir: Vec2) -> Self {
        Self::new(heading_from_direction(dir))
    }

    /// Unit vector the entity is facing.
    pub fn facing(&self) -> Vec2 {
        facing_from_heading(self.degrees)
    }

    /// Turn 180° in place.
    pub fn flip(&mut self) {
        self.degrees = normalize_degrees(self.degrees + 180.0);
    }

    /// Move towards `target` degrees along the shortest arc by fraction `t`.
    ///
    /// `t` is clamped to `[0, 1]`; callers pass `turn_speed * scaled_dt`.
    pub fn turn_towards(&mut self, target: f32, t: f32) {
        let t = t.clamp(0.0, 1.0);
        let diff = shortest_arc(self.degrees, target);
        self.degrees = normalize_degrees(self.degrees + diff * t);
    }
}

/// Unit facing vector for a heading in degrees.
pub fn facing_from_heading(degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(-sin, cos)
}

/// Heading in degrees for a direction vector (`atan2` angle minus 90°).
pub fn heading_from_direction(dir: Vec2) -> f32 {
    if dir.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    normalize_degrees(dir.y.atan2(dir.x).to_degrees() - 90.0)
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed difference `to - from` wrapped into `(-180, 180]`.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 { diff - 360.0 } else { diff }
}
