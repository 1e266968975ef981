//! Rebuilds the [`ArenaPhysics`](crate::resources::physics::ArenaPhysics)
//! snapshot from the ECS.
use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::collider::Collider;
use crate::components::mapposition::MapPosition;
use crate::components::pooled::{Inactive, Spent};
use crate::components::wall::Wall;
use crate::resources::physics::ArenaPhysics;

/// Pooled entities waiting in a pool and soft-disabled bullets are left out.
pub fn sync_physics_scene(
    mut physics: ResMut<ArenaPhysics>,
    bodies: Query<(Entity, &MapPosition, &Collider), (Without<Inactive>, Without<Spent>)>,
    walls: Query<(Entity, &MapPosition, &BoxCollider), With<Wall>>,
) {
    physics.clear();
    for (entity, position, collider) in walls.iter() {
        physics.add_wall(entity, position.pos, *collider);
    }
    for (entity, position, collider) in bodies.iter() {
        if collider.layer != 0 {
            physics.add_body(entity, position.pos, collider.radius, collider.layer);
        }
    }
}
