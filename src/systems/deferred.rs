//! Runs due [`DeferredQueue`](crate::resources::deferred::DeferredQueue)
//! tasks.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::enemy::EnemyAi;
use crate::components::faction::Faction;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::pooled::Inactive;
use crate::components::rotation::Rotation;
use crate::resources::deferred::{DeferredAction, DeferredQueue};
use crate::resources::pool::{EntityPools, PoolKind};
use crate::resources::session::SessionRng;
use crate::resources::worldtime::WorldTime;

/// Count every task down and run those that came due.
///
/// Tasks whose owner has been recycled since scheduling (pool generation
/// mismatch) are dropped without running.
pub fn run_deferred_tasks(
    time: Res<WorldTime>,
    mut queue: ResMut<DeferredQueue>,
    mut pools: ResMut<EntityPools>,
    mut rng: ResMut<SessionRng>,
    mut health: Query<&mut Health>,
    mut enemies: Query<(&mut EnemyAi, &MapPosition, &Rotation), Without<Inactive>>,
    mut commands: Commands,
) {
    for task in queue.advance(time.delta, time.real_delta) {
        if task.token.is_some() && !pools.is_current(task.owner, task.token) {
            debug!("Dropping stale {:?} for {:?}", task.action, task.owner);
            continue;
        }
        match task.action {
            DeferredAction::Release => {
                pools.release(task.owner, &mut commands);
            }
            DeferredAction::EndInvincibility => {
                if let Ok(mut h) = health.get_mut(task.owner) {
                    h.invincible = false;
                }
            }
            DeferredAction::EnemyShoot => {
                let Ok((mut ai, position, rotation)) = enemies.get_mut(task.owner) else {
                    continue;
                };
                fire_bullet(position.pos, *rotation, &mut pools, &mut commands);
                ai.attacking = false;
                ai.reroll_cooldown(&mut rng.0);
            }
        }
    }
}

fn fire_bullet(
    origin: glam::Vec2,
    rotation: Rotation,
    pools: &mut EntityPools,
    commands: &mut Commands,
) {
    match pools.acquire(PoolKind::Bullet, commands) {
        Ok(bullet) => {
            commands
                .entity(bullet)
                .insert((MapPosition::from_vec(origin), rotation, Faction::Enemy));
        }
        Err(err) => debug!("Enemy shot skipped: {err}"),
    }
}
