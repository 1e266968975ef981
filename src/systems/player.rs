//! Player control.
//!
//! Movement, turning, and the attack cooldown all run on scaled time. While
//! the dilation button is held the player is rooted in place but can still
//! turn, which is how a dash is aimed. Each attack press spawns one slash
//! from the slash pool, `offset` units in front of the player; holding the
//! button does not repeat it.
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::collider::layers;
use crate::components::faction::Faction;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::rotation::{Rotation, heading_from_direction};
use crate::components::timedilation::TimeDilation;
use crate::events::presentation::{Clip, PresentationCmd};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::physics::{ArenaPhysics, CollisionOracle};
use crate::resources::pool::{EntityPools, PoolKind};
use crate::resources::worldtime::WorldTime;

/// Step from `from` by `step`, sliding along walls instead of entering them.
fn slide(physics: &ArenaPhysics, from: Vec2, step: Vec2, radius: f32) -> Vec2 {
    let blocked = |p: Vec2| !physics.overlap_circle(p, radius, layers::WALL).is_empty();
    for candidate in [from + step, from + Vec2::new(step.x, 0.0), from + Vec2::new(0.0, step.y)] {
        if !blocked(candidate) {
            return candidate;
        }
    }
    from
}

#[allow(clippy::too_many_arguments)]
pub fn player_control_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    config: Res<GameConfig>,
    physics: Res<ArenaPhysics>,
    mut pools: ResMut<EntityPools>,
    mut writer: MessageWriter<PresentationCmd>,
    mut query: Query<(
        &mut Player,
        &mut MapPosition,
        &mut Rotation,
        Option<&TimeDilation>,
    )>,
    mut commands: Commands,
) {
    let dt = time.delta;
    for (mut player, mut position, mut rotation, dilation) in query.iter_mut() {
        player.cooldown_remaining = (player.cooldown_remaining - dt).max(0.0);

        let move_vector = input.move_vector;
        if move_vector.length_squared() > 0.0 {
            rotation.turn_towards(heading_from_direction(move_vector), player.rotate_speed * dt);
            if !input.dilation.active {
                let step = move_vector * (player.move_speed * dt);
                position.pos = slide(&physics, position.pos, step, player.radius);
            }
        }

        // While dilation is active the attack button belongs to the dash.
        let dashing = dilation.is_some_and(|d| d.is_active());
        if !input.attack.just_pressed || dashing || !player.can_attack() {
            continue;
        }
        let slash = match pools.acquire(PoolKind::Slash, &mut commands) {
            Ok(slash) => slash,
            Err(err) => {
                debug!("Slash skipped: {err}");
                continue;
            }
        };
        let spawn_at = position.pos + rotation.facing() * config.slash.offset;
        commands
            .entity(slash)
            .insert((MapPosition::from_vec(spawn_at), *rotation, Faction::Player));
        if let Some(token) = pools.generation_of(slash) {
            writer.write(PresentationCmd::Play {
                entity: slash,
                token,
                clip: Clip::Slash,
            });
        }
        player.cooldown_remaining = player.attack_cooldown;
    }
}
