use bevy_ecs::prelude::*;

use crate::components::bullet::Bullet;
use crate::components::mapposition::MapPosition;
use crate::components::pooled::{Inactive, Spent};
use crate::components::rotation::Rotation;
use crate::resources::worldtime::WorldTime;

/// Fly live bullets along their heading.
pub fn projectile_movement_system(
    mut query: Query<(&mut MapPosition, &Rotation, &Bullet), (Without<Inactive>, Without<Spent>)>,
    time: Res<WorldTime>,
) {
    for (mut position, rotation, bullet) in query.iter_mut() {
        position.pos += rotation.facing() * (bullet.speed * time.delta);
    }
}
