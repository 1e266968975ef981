//! Circle body collider and physics layer masks.
//!
//! Every moving gameplay entity is a circle. Walls use
//! [`BoxCollider`](crate::components::boxcollider::BoxCollider) instead. The
//! [`layers`] bits are what [`CollisionOracle`](crate::resources::physics::CollisionOracle)
//! queries filter on.

use bevy_ecs::prelude::Component;

pub mod layers {
    pub const WALL: u32 = 1 << 0;
    pub const PLAYER: u32 = 1 << 1;
    pub const ENEMY: u32 = 1 << 2;
    pub const PROJECTILE: u32 = 1 << 3;
    pub const ALL: u32 = WALL | PLAYER | ENEMY | PROJECTILE;
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Collider {
    pub radius: f32,
    pub layer: u32,
}

impl Collider {
    pub fn new(radius: f32, layer: u32) -> Self {
        Self { radius, layer }
    }

    pub fn in_mask(&self, mask: u32) -> bool {
        self.layer & mask != 0
    }
}
