//! Collision detection and dispatch.
//!
//! [`collision_detector`] queries the oracle for every live slash and bullet
//! and emits a [`CollisionEvent`] per relevant contact:
//!
//! - a slash reports each enemy or bullet it overlaps, once per swing;
//! - a bullet reports only the nearest wall or opposing body it touches.
//!
//! [`collision_observer`] turns those contacts into attacks:
//!
//! - slash contacts become slash attacks, unless a wall stands between the
//!   slash's origin (one unit behind it) and the target;
//! - bullet vs wall soft-disables the bullet;
//! - an enemy bullet touching a player whose dilation is Active is reflected
//!   by the player's body instead of hurting it;
//! - any other bullet vs damageable contact becomes a projectile attack and
//!   soft-disables the bullet.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::combat::{AttackSource, Attacker};
use crate::components::bullet::Bullet;
use crate::components::collider::{Collider, layers};
use crate::components::faction::Faction;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::pooled::{Inactive, Spent};
use crate::components::rotation::Rotation;
use crate::components::slash::Slash;
use crate::components::timedilation::TimeDilation;
use crate::components::wall::Wall;
use crate::events::collision::CollisionEvent;
use crate::events::combat::AttackEvent;
use crate::resources::deferred::DeferredQueue;
use crate::resources::physics::{ArenaPhysics, CollisionOracle};
use crate::resources::pool::EntityPools;
use crate::systems::lifespan::soft_disable_bullet;

fn opposing_layer(faction: Faction) -> u32 {
    match faction {
        Faction::Player => layers::ENEMY,
        Faction::Enemy => layers::PLAYER,
    }
}

pub fn collision_detector(
    physics: Res<ArenaPhysics>,
    mut slashes: Query<(Entity, &MapPosition, &Collider, &mut Slash), Without<Inactive>>,
    bullets: Query<
        (Entity, &MapPosition, &Collider, &Faction),
        (With<Bullet>, Without<Inactive>, Without<Spent>),
    >,
    mut commands: Commands,
) {
    for (entity, position, collider, mut slash) in slashes.iter_mut() {
        let contacts = physics.overlap_circle(
            position.pos,
            collider.radius,
            layers::ENEMY | layers::PROJECTILE,
        );
        for contact in contacts {
            if slash.register_hit(contact.entity) {
                commands.trigger(CollisionEvent {
                    a: entity,
                    b: contact.entity,
                });
            }
        }
    }

    for (entity, position, collider, faction) in bullets.iter() {
        let mask = layers::WALL | opposing_layer(*faction);
        let nearest = physics
            .overlap_circle(position.pos, collider.radius, mask)
            .into_iter()
            .find(|c| c.entity != entity);
        if let Some(contact) = nearest {
            commands.trigger(CollisionEvent {
                a: entity,
                b: contact.entity,
            });
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub fn collision_observer(
    trigger: On<CollisionEvent>,
    physics: Res<ArenaPhysics>,
    pools: Res<EntityPools>,
    mut deferred: ResMut<DeferredQueue>,
    slashes: Query<(&MapPosition, &Rotation, &Faction), With<Slash>>,
    bullets: Query<(&Rotation, &Faction, &Bullet, Has<Spent>)>,
    walls: Query<(), With<Wall>>,
    players: Query<(&Rotation, &TimeDilation), With<Player>>,
    damageables: Query<(), With<Health>>,
    positions: Query<&MapPosition>,
    mut commands: Commands,
) {
    let CollisionEvent { a, b } = *trigger.event();

    if let Ok((position, rotation, faction)) = slashes.get(a) {
        let facing = rotation.facing();
        let origin = position.pos - facing;
        if let Ok(target) = positions.get(b) {
            if !physics.line_of_sight(origin, target.pos) {
                debug!("Slash {:?} blocked by a wall before {:?}", a, b);
                return;
            }
        }
        commands.trigger(AttackEvent {
            source: a,
            attacker: Attacker {
                faction: *faction,
                facing,
                source: AttackSource::Slash,
            },
            target: b,
        });
        return;
    }

    let Ok((rotation, faction, bullet, spent)) = bullets.get(a) else {
        return;
    };
    if spent {
        return;
    }

    if walls.contains(b) {
        soft_disable_bullet(a, bullet.trail, &pools, &mut deferred, &mut commands);
        return;
    }

    if *faction == Faction::Enemy {
        if let Ok((player_rotation, dilation)) = players.get(b) {
            if dilation.is_active() {
                commands.trigger(AttackEvent {
                    source: b,
                    attacker: Attacker {
                        faction: Faction::Player,
                        facing: player_rotation.facing(),
                        source: AttackSource::Actor,
                    },
                    target: a,
                });
                return;
            }
        }
    }

    if damageables.contains(b) {
        commands.trigger(AttackEvent {
            source: a,
            attacker: Attacker {
                faction: *faction,
                facing: rotation.facing(),
                source: AttackSource::Projectile,
            },
            target: b,
        });
        soft_disable_bullet(a, bullet.trail, &pools, &mut deferred, &mut commands);
    }
}
