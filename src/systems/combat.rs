//! Applies resolved attacks to the world.
//!
//! [`attack_observer`] handles every [`AttackEvent`]: it gathers the target's
//! capabilities, asks [`crate::combat`] for the outcome, and writes it back.
//!
//! - Redirected bullets get their new heading, faction, speed, and a fresh
//!   lifespan, and a pooled hit effect is played where they were struck.
//! - Damaged targets open their invincibility window (closed by a real-time
//!   deferred task); the player also gets a hit flash and a
//!   [`PlayerDamagedEvent`].
//! - Defeated pooled targets are returned to their pool with any pending
//!   deferred work cancelled, and a [`DefeatEvent`] is emitted.
//!
//! A [`HitEvent`] is emitted for every strike or damage that lands.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::combat::{DamageOutcome, StrikeKind, resolve_damage, resolve_strike};
use crate::components::attackable::Attackable;
use crate::components::bullet::Bullet;
use crate::components::faction::Faction;
use crate::components::health::Health;
use crate::components::mapposition::MapPosition;
use crate::components::player::Player;
use crate::components::pooled::{Inactive, Spent};
use crate::components::rotation::{Rotation, heading_from_direction};
use crate::events::combat::{AttackEvent, DefeatEvent, HitEvent, HitKind, PlayerDamagedEvent};
use crate::events::presentation::{Clip, PresentationCmd};
use crate::resources::deferred::{Clock, DeferredAction, DeferredQueue};
use crate::resources::pool::{EntityPools, PoolKind};

#[allow(clippy::too_many_arguments)]
pub fn attack_observer(
    trigger: On<AttackEvent>,
    mut attackables: Query<
        (&mut Rotation, &mut Faction, &mut Bullet, &MapPosition),
        (With<Attackable>, Without<Inactive>, Without<Spent>),
    >,
    mut damageables: Query<(&mut Health, &Faction, Option<&Player>), (Without<Bullet>, Without<Inactive>)>,
    mut pools: ResMut<EntityPools>,
    mut deferred: ResMut<DeferredQueue>,
    mut writer: MessageWriter<PresentationCmd>,
    mut commands: Commands,
) {
    let AttackEvent {
        source,
        attacker,
        target,
    } = *trigger.event();

    if let Ok((mut rotation, mut faction, mut bullet, position)) = attackables.get_mut(target) {
        let Some(outcome) = resolve_strike(&attacker, rotation.degrees, *faction) else {
            debug!("Strike on {:?} ignored: already {:?}", target, *faction);
            return;
        };
        rotation.degrees = outcome.heading;
        *faction = outcome.faction;
        bullet.redirect(outcome.speed_multiplier);

        let kind = match outcome.kind {
            StrikeKind::Deflected => HitKind::Deflect,
            StrikeKind::Reflected => HitKind::Reflect,
        };
        commands.trigger(HitEvent {
            source,
            target,
            kind,
        });

        if let Ok(vfx) = pools.acquire(PoolKind::HitVfx, &mut commands) {
            let vfx_rotation = Rotation::new(heading_from_direction(attacker.facing));
            commands
                .entity(vfx)
                .insert((MapPosition::from_vec(position.pos), vfx_rotation));
            if let Some(token) = pools.generation_of(vfx) {
                writer.write(PresentationCmd::Play {
                    entity: vfx,
                    token,
                    clip: Clip::Hit,
                });
            }
        }
        return;
    }

    let Ok((mut health, faction, player)) = damageables.get_mut(target) else {
        debug!("No target acquired for attack from {:?}", source);
        return;
    };
    let faction = *faction;
    let outcome = resolve_damage(attacker.faction, faction, &mut health);
    if let DamageOutcome::Ignored(reason) = outcome {
        debug!("Damage to {:?} ignored: {:?}", target, reason);
        return;
    }

    commands.trigger(HitEvent {
        source,
        target,
        kind: HitKind::Damage { target: faction },
    });

    if health.invincible && health.invincibility_window > 0.0 {
        deferred.cancel(target, DeferredAction::EndInvincibility);
        deferred.schedule(
            target,
            pools.generation_of(target),
            health.invincibility_window,
            Clock::Real,
            DeferredAction::EndInvincibility,
        );
    }

    if let Some(player) = player {
        commands.trigger(PlayerDamagedEvent {
            entity: target,
            remaining: health.current,
        });
        writer.write(PresentationCmd::HitFlash {
            entity: target,
            duration: player.flash,
        });
    }

    if outcome == DamageOutcome::Defeated {
        if pools.kind_of(target).is_some() {
            deferred.cancel_owner(target);
            pools.release(target, &mut commands);
        }
        commands.trigger(DefeatEvent {
            entity: target,
            faction,
        });
    }
}
