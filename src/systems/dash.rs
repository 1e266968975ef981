//! Dash attack.
//!
//! Pressing attack while time dilation is Active spends the whole energy bar
//! and:
//!
//! 1. measures how far the player can travel along its facing before the
//!    first wall (minus its body radius), capped at the dash range;
//! 2. sweeps a box of the dash width over that path and sends a dash-sweep
//!    [`AttackEvent`] to every enemy and bullet in it that the origin can
//!    see;
//! 3. teleports the player to the end of the path and plays the dash effect
//!    from the start point.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::combat::{AttackSource, Attacker};
use crate::components::collider::layers;
use crate::components::faction::Faction;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rotation::Rotation;
use crate::components::timedilation::TimeDilation;
use crate::events::combat::AttackEvent;
use crate::events::presentation::{Clip, PresentationCmd};
use crate::resources::input::InputState;
use crate::resources::physics::{ArenaPhysics, CollisionOracle};
use crate::resources::pool::{EntityPools, PoolKind};
use crate::resources::timeauthority::TimeAuthority;

/// Distance the dash covers from `origin` along `facing`.
pub fn dash_travel(
    physics: &impl CollisionOracle,
    origin: glam::Vec2,
    facing: glam::Vec2,
    range: f32,
    body_radius: f32,
) -> f32 {
    match physics.raycast(origin, facing, range + body_radius, layers::WALL) {
        Some(hit) => (hit.distance - body_radius).clamp(0.0, range),
        None => range,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn dash_attack_system(
    input: Res<InputState>,
    physics: Res<ArenaPhysics>,
    mut authority: ResMut<TimeAuthority>,
    mut pools: ResMut<EntityPools>,
    mut writer: MessageWriter<PresentationCmd>,
    mut players: Query<(
        Entity,
        &Player,
        &mut MapPosition,
        &Rotation,
        &mut TimeDilation,
    )>,
    mut commands: Commands,
) {
    if !input.attack.just_pressed {
        return;
    }
    for (entity, player, mut position, rotation, mut dilation) in players.iter_mut() {
        if !dilation.spend_for_dash() {
            continue;
        }
        if authority.resume() {
            dilation.owes_resume = false;
        }

        let origin = position.pos;
        let facing = rotation.facing();
        let travel = dash_travel(&*physics, origin, facing, dilation.dash_range, player.radius);
        let attacker = Attacker {
            faction: Faction::Player,
            facing,
            source: AttackSource::DashSweep,
        };

        let swept = physics.box_sweep(
            origin,
            facing,
            dilation.dash_width,
            travel,
            layers::ENEMY | layers::PROJECTILE,
        );
        let mut struck = 0;
        for contact in swept.iter() {
            if !physics.line_of_sight(origin, contact.center) {
                debug!("Dash target {:?} behind a wall", contact.entity);
                continue;
            }
            commands.trigger(AttackEvent {
                source: entity,
                attacker,
                target: contact.entity,
            });
            struck += 1;
        }

        position.pos = origin + facing * travel;
        info!(
            "Dash from {:?} over {:.2} units, {} targets",
            origin, travel, struck
        );

        if let Ok(effect) = pools.acquire(PoolKind::DashEffect, &mut commands) {
            commands
                .entity(effect)
                .insert((MapPosition::from_vec(origin), *rotation));
            if let Some(token) = pools.generation_of(effect) {
                writer.write(PresentationCmd::Play {
                    entity: effect,
                    token,
                    clip: Clip::Dash,
                });
            }
        }
    }
}
