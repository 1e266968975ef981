//! Combat notifications.
//!
//! The flow for a single contact is:
//!
//! 1. [`AttackEvent`]: an attack reached a target and should be resolved.
//! 2. [`HitEvent`]: something landed (deflect, reflect, or damage). The
//!    hitstop observer freezes time in response.
//! 3. [`DefeatEvent`]: a damageable reached zero health.
//!
//! [`PlayerDamagedEvent`] is a side notification for HUD shake and similar
//! feedback.
use bevy_ecs::prelude::*;

use crate::combat::Attacker;
use crate::components::faction::Faction;

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackEvent {
    /// Entity delivering the attack (slash, bullet, or the player for dash
    /// sweeps and body reflections).
    pub source: Entity,
    pub attacker: Attacker,
    pub target: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Deflect,
    Reflect,
    /// Damage landed on a target of the given faction.
    Damage { target: Faction },
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitEvent {
    pub source: Entity,
    pub target: Entity,
    pub kind: HitKind,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatEvent {
    pub entity: Entity,
    pub faction: Faction,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDamagedEvent {
    pub entity: Entity,
    pub remaining: i32,
}
