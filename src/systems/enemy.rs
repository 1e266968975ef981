//! Enemy AI.
//!
//! Each tick an enemy looks for the player inside its range with a clear
//! line of sight. With no target it does nothing. With a target it turns
//! towards it and, once its shot timer passes the rolled cooldown, starts a
//! wind-up. The shot itself is a deferred task that fires when the wind-up
//! ends (see [`crate::systems::deferred`]).
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::collider::layers;
use crate::components::enemy::EnemyAi;
use crate::components::mapposition::MapPosition;
use crate::components::pooled::Inactive;
use crate::components::rotation::{Rotation, heading_from_direction};
use crate::events::presentation::{Clip, PresentationCmd};
use crate::resources::deferred::{Clock, DeferredAction, DeferredQueue};
use crate::resources::physics::{ArenaPhysics, CollisionOracle};
use crate::resources::pool::EntityPools;
use crate::resources::worldtime::WorldTime;

/// First player within `range` of `origin` that nothing blocks.
///
/// The sight line is cast against players and walls together; the target
/// only counts when the first thing it hits is that same player.
pub fn acquire_target(
    oracle: &impl CollisionOracle,
    origin: Vec2,
    range: f32,
) -> Option<(Entity, Vec2)> {
    oracle
        .overlap_circle(origin, range, layers::PLAYER)
        .into_iter()
        .find(|candidate| {
            oracle
                .linecast(origin, candidate.center, layers::PLAYER | layers::WALL)
                .is_some_and(|hit| hit.entity == candidate.entity)
        })
        .map(|c| (c.entity, c.center))
}

pub fn enemy_ai_system(
    time: Res<WorldTime>,
    physics: Res<ArenaPhysics>,
    pools: Res<EntityPools>,
    mut deferred: ResMut<DeferredQueue>,
    mut writer: MessageWriter<PresentationCmd>,
    mut enemies: Query<(Entity, &mut EnemyAi, &MapPosition, &mut Rotation), Without<Inactive>>,
) {
    let dt = time.delta;
    for (entity, mut ai, position, mut rotation) in enemies.iter_mut() {
        let Some((target, target_pos)) = acquire_target(&*physics, position.pos, ai.range) else {
            ai.target = None;
            continue;
        };
        if ai.target != Some(target) {
            debug!("Enemy {:?} acquired {:?}", entity, target);
        }
        ai.target = Some(target);

        let heading = heading_from_direction(target_pos - position.pos);
        rotation.turn_towards(heading, ai.rotate_speed * dt);

        if ai.ready_to_fire() {
            ai.attacking = true;
            let token = pools.generation_of(entity);
            deferred.schedule(entity, token, ai.windup, Clock::Scaled, DeferredAction::EnemyShoot);
            if let Some(token) = token {
                writer.write(PresentationCmd::Play {
                    entity,
                    token,
                    clip: Clip::EnemyWindup,
                });
            }
        }
        ai.shot_timer += dt;
    }
}
