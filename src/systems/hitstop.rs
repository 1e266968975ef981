//! Hitstop trigger.
//!
//! Every [`HitEvent`] freezes gameplay through the
//! [`TimeAuthority`](crate::resources::timeauthority::TimeAuthority). Damage
//! to an enemy gets the longer, heavier freeze; everything else the short
//! one. Overlapping hitstops keep the longer remaining time.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::faction::Faction;
use crate::events::combat::{HitEvent, HitKind};
use crate::resources::gameconfig::GameConfig;
use crate::resources::timeauthority::TimeAuthority;

pub fn hitstop_duration(config: &GameConfig, kind: HitKind) -> f32 {
    match kind {
        HitKind::Damage {
            target: Faction::Enemy,
        } => config.hitstop_enemy_damage,
        HitKind::Damage { .. } | HitKind::Deflect | HitKind::Reflect => config.hitstop,
    }
}

pub fn hitstop_observer(
    trigger: On<HitEvent>,
    config: Res<GameConfig>,
    mut authority: ResMut<TimeAuthority>,
) {
    let event = trigger.event();
    let duration = hitstop_duration(&config, event.kind);
    authority.trigger_hitstop(duration);
    debug!(
        "Hitstop {:.2}s for {:?} on {:?}",
        duration, event.kind, event.target
    );
}
