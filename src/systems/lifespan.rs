//! Lifespan systems for slashes and bullets.
//!
//! Both count their age with scaled time, so slow motion stretches them and
//! hitstop freezes them.
//!
//! - A slash that reaches its lifespan goes straight back to its pool.
//! - A bullet that reaches its lifespan is soft-disabled (see
//!   [`soft_disable_bullet`]) and released once its trail has faded.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::bullet::Bullet;
use crate::components::pooled::{Inactive, Spent};
use crate::components::slash::Slash;
use crate::resources::deferred::{Clock, DeferredAction, DeferredQueue};
use crate::resources::pool::EntityPools;
use crate::resources::worldtime::WorldTime;

/// Stop a bullet from moving or colliding and schedule its release after
/// `trail` real seconds.
pub fn soft_disable_bullet(
    entity: Entity,
    trail: f32,
    pools: &EntityPools,
    deferred: &mut DeferredQueue,
    commands: &mut Commands,
) {
    commands.entity(entity).try_insert(Spent);
    deferred.cancel(entity, DeferredAction::Release);
    deferred.schedule(
        entity,
        pools.generation_of(entity),
        trail,
        Clock::Real,
        DeferredAction::Release,
    );
    debug!("Bullet {:?} soft-disabled, release in {:.2}s", entity, trail);
}

pub fn slash_lifespan_system(
    time: Res<WorldTime>,
    mut pools: ResMut<EntityPools>,
    mut query: Query<(Entity, &mut Slash), Without<Inactive>>,
    mut commands: Commands,
) {
    for (entity, mut slash) in query.iter_mut() {
        slash.age += time.delta;
        if slash.age >= slash.lifespan {
            pools.release(entity, &mut commands);
        }
    }
}

pub fn bullet_lifespan_system(
    time: Res<WorldTime>,
    pools: Res<EntityPools>,
    mut deferred: ResMut<DeferredQueue>,
    mut query: Query<(Entity, &mut Bullet), (Without<Inactive>, Without<Spent>)>,
    mut commands: Commands,
) {
    for (entity, mut bullet) in query.iter_mut() {
        bullet.age += time.delta;
        if bullet.expired() {
            soft_disable_bullet(entity, bullet.trail, &pools, &mut deferred, &mut commands);
        }
    }
}
