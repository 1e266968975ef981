//! Overlap and line-of-sight oracle.
//!
//! Gameplay never asks the ECS "what is near me" directly. It goes through
//! [`CollisionOracle`], the narrow seam a real broad-phase would sit behind.
//! [`ArenaPhysics`] is the built-in implementation: a flat snapshot of circle
//! bodies and wall boxes rebuilt every tick by
//! [`sync_physics_scene`](crate::systems::physics::sync_physics_scene).
//!
//! All queries take a layer mask built from
//! [`layers`](crate::components::collider::layers) and return contacts sorted
//! by distance from the query origin.

use bevy_ecs::prelude::*;
use glam::Vec2;
use smallvec::SmallVec;

use crate::components::boxcollider::BoxCollider;
use crate::components::collider::layers;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub entity: Entity,
    /// Where the query touched the collider.
    pub point: Vec2,
    /// Position of the collider's owner.
    pub center: Vec2,
    /// Distance from the query origin to `point`.
    pub distance: f32,
    pub layer: u32,
}

pub type Contacts = SmallVec<[Contact; 8]>;

pub trait CollisionOracle {
    /// Everything in `mask` overlapping the circle.
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: u32) -> Contacts;

    /// First thing in `mask` crossed by the segment `from -> to`.
    fn linecast(&self, from: Vec2, to: Vec2, mask: u32) -> Option<Contact>;

    /// Everything in `mask` touched by a box of `width` swept from `origin`
    /// along `direction` for `distance`.
    fn box_sweep(
        &self,
        origin: Vec2,
        direction: Vec2,
        width: f32,
        distance: f32,
        mask: u32,
    ) -> Contacts;

    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: u32) -> Option<Contact> {
        let dir = direction.normalize_or_zero();
        self.linecast(origin, origin + dir * max_distance, mask)
    }

    /// No wall between `from` and `to`.
    fn line_of_sight(&self, from: Vec2, to: Vec2) -> bool {
        self.linecast(from, to, layers::WALL).is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub entity: Entity,
    pub center: Vec2,
    pub radius: f32,
    pub layer: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallBox {
    pub entity: Entity,
    pub position: Vec2,
    pub collider: BoxCollider,
}

#[derive(Resource, Default, Debug, Clone)]
pub struct ArenaPhysics {
    pub bodies: Vec<Body>,
    pub walls: Vec<WallBox>,
}

impl ArenaPhysics {
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.walls.clear();
    }

    pub fn add_body(&mut self, entity: Entity, center: Vec2, radius: f32, layer: u32) {
        self.bodies.push(Body {
            entity,
            center,
            radius,
            layer,
        });
    }

    pub fn add_wall(&mut self, entity: Entity, position: Vec2, collider: BoxCollider) {
        self.walls.push(WallBox {
            entity,
            position,
            collider,
        });
    }
}

/// Fraction along `from -> to` where the segment enters the circle.
fn segment_circle_entry(from: Vec2, to: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let d = to - from;
    let f = from - center;
    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = d.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * f.dot(d);
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / (2.0 * a);
    (0.0..=1.0).contains(&t).then_some(t)
}

fn sort_by_distance(contacts: &mut Contacts) {
    contacts.sort_by(|a, b| a.distance.total_cmp(&b.distance));
}

impl CollisionOracle for ArenaPhysics {
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: u32) -> Contacts {
        let mut out = Contacts::new();
        if mask & layers::WALL != 0 {
            for wall in &self.walls {
                if wall.collider.overlaps_circle(wall.position, center, radius) {
                    let point = wall.collider.closest_point(wall.position, center);
                    out.push(Contact {
                        entity: wall.entity,
                        point,
                        center: wall.position,
                        distance: center.distance(point),
                        layer: layers::WALL,
                    });
                }
            }
        }
        for body in self.bodies.iter().filter(|b| b.layer & mask != 0) {
            let dist = center.distance(body.center);
            if dist <= radius + body.radius {
                let point = body.center + (center - body.center).normalize_or_zero() * body.radius.min(dist);
                out.push(Contact {
                    entity: body.entity,
                    point,
                    center: body.center,
                    distance: (dist - body.radius).max(0.0),
                    layer: body.layer,
                });
            }
        }
        sort_by_distance(&mut out);
        out
    }

    fn linecast(&self, from: Vec2, to: Vec2, mask: u32) -> Option<Contact> {
        let length = from.distance(to);
        let mut best: Option<(f32, Contact)> = None;
        let mut consider = |t: f32, entity: Entity, center: Vec2, layer: u32| {
            if best.as_ref().is_some_and(|(bt, _)| *bt <= t) {
                return;
            }
            let point = from.lerp(to, t);
            best = Some((
                t,
                Contact {
                    entity,
                    point,
                    center,
                    distance: length * t,
                    layer,
                },
            ));
        };
        if mask & layers::WALL != 0 {
            for wall in &self.walls {
                if let Some(t) = wall.collider.segment_entry(wall.position, from, to) {
                    consider(t, wall.entity, wall.position, layers::WALL);
                }
            }
        }
        for body in self.bodies.iter().filter(|b| b.layer & mask != 0) {
            if let Some(t) = segment_circle_entry(from, to, body.center, body.radius) {
                consider(t, body.entity, body.center, body.layer);
            }
        }
        best.map(|(_, contact)| contact)
    }

    fn box_sweep(
        &self,
        origin: Vec2,
        direction: Vec2,
        width: f32,
        distance: f32,
        mask: u32,
    ) -> Contacts {
        let mut out = Contacts::new();
        let forward = direction.normalize_or_zero();
        if forward == Vec2::ZERO {
            return out;
        }
        let half_width = width * 0.5;
        let side = forward.perp();
        for body in self.bodies.iter().filter(|b| b.layer & mask != 0) {
            let rel = body.center - origin;
            let along = rel.dot(forward);
            let across = rel.dot(side).abs();
            if along >= -body.radius
                && along <= distance + body.radius
                && across <= half_width + body.radius
            {
                let clamped = along.clamp(0.0, distance);
                out.push(Contact {
                    entity: body.entity,
                    point: origin + forward * clamped,
                    center: body.center,
                    distance: clamped,
                    layer: body.layer,
                });
            }
        }
        // Walls only register where the sweep's centre line crosses them.
        if mask & layers::WALL != 0 {
            if let Some(hit) = self.linecast(origin, origin + forward * distance, layers::WALL) {
                out.push(hit);
            }
        }
        sort_by_distance(&mut out);
        out
    }
}
