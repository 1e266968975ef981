//! Pure combat resolution.
//!
//! Nothing here touches the ECS. Observers in
//! [`crate::systems::combat`] gather the participants, call into this module,
//! and apply the returned outcome (rotation, faction, speed, health, pool
//! release, notifications).
//!
//! # Redirecting attackables
//!
//! A strike against an attackable (a bullet) compares the attacker's facing
//! with the bullet's facing:
//!
//! - `dot > -0.75`: **deflect**. The bullet takes the attacker's heading.
//! - `dot <= -0.75`: **reflect**. The bullet turns 180° in place, straight
//!   back at whoever fired it.
//!
//! An actor body (the player while dilation is active) always reflects. In
//! every case the bullet switches to the attacker's faction, its speed is
//! multiplied by the source's multiplier, and its lifespan restarts.

use glam::Vec2;

use crate::components::faction::Faction;
use crate::components::health::Health;
use crate::components::rotation::{facing_from_heading, heading_from_direction, normalize_degrees};

/// Facing dot product at or below which a strike reflects instead of
/// deflecting.
pub const DEFLECT_DOT_THRESHOLD: f32 = -0.75;
pub const SLASH_SPEED_MULTIPLIER: f32 = 3.0;
pub const DASH_SPEED_MULTIPLIER: f32 = 5.0;
pub const ACTOR_SPEED_MULTIPLIER: f32 = 3.0;

/// What delivered the attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackSource {
    Slash,
    DashSweep,
    /// The body of an actor, used for reflections off the player.
    Actor,
    /// A bullet hitting something damageable.
    Projectile,
}

impl AttackSource {
    pub fn speed_multiplier(self) -> f32 {
        match self {
            AttackSource::Slash => SLASH_SPEED_MULTIPLIER,
            AttackSource::DashSweep => DASH_SPEED_MULTIPLIER,
            AttackSource::Actor => ACTOR_SPEED_MULTIPLIER,
            AttackSource::Projectile => 1.0,
        }
    }

    fn always_reflects(self) -> bool {
        matches!(self, AttackSource::Actor)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attacker {
    pub faction: Faction,
    /// Facing of the attacker. Need not be normalized.
    pub facing: Vec2,
    pub source: AttackSource,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrikeKind {
    Deflected,
    Reflected,
}

/// New state for a struck attackable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrikeOutcome {
    pub kind: StrikeKind,
    /// Heading in degrees to assign to the target.
    pub heading: f32,
    pub faction: Faction,
    pub speed_multiplier: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    FriendlyFire,
    Invincible,
    AlreadyDefeated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored(IgnoreReason),
    Damaged { remaining: i32 },
    Defeated,
}

/// Resolve a strike against an attackable facing `target_heading`.
///
/// Returns `None` when the target already belongs to the attacker's faction;
/// such strikes change nothing and emit no hit.
pub fn resolve_strike(
    attacker: &Attacker,
    target_heading: f32,
    target_faction: Faction,
) -> Option<StrikeOutcome> {
    if target_faction == attacker.faction {
        return None;
    }
    let attacker_facing = attacker.facing.normalize_or_zero();
    let target_facing = facing_from_heading(target_heading);
    let dot = attacker_facing.dot(target_facing);

    let (kind, heading) =
        if attacker.source.always_reflects() || dot <= DEFLECT_DOT_THRESHOLD {
            (StrikeKind::Reflected, normalize_degrees(target_heading + 180.0))
        } else {
            (StrikeKind::Deflected, heading_from_direction(attacker_facing))
        };

    Some(StrikeOutcome {
        kind,
        heading,
        faction: attacker.faction,
        speed_multiplier: attacker.source.speed_multiplier(),
    })
}

/// Apply one point of damage from `attacker_faction` to `health`.
///
/// Same-faction, invincible, and already-defeated targets are left untouched.
/// A landed hit opens the target's invincibility window when it has one;
/// the caller is responsible for closing it.
pub fn resolve_damage(
    attacker_faction: Faction,
    target_faction: Faction,
    health: &mut Health,
) -> DamageOutcome {
    if attacker_faction == target_faction {
        return DamageOutcome::Ignored(IgnoreReason::FriendlyFire);
    }
    if health.is_defeated() {
        return DamageOutcome::Ignored(IgnoreReason::AlreadyDefeated);
    }
    if health.invincible {
        return DamageOutcome::Ignored(IgnoreReason::Invincible);
    }
    health.current = (health.current - 1).max(0);
    if health.invincibility_window > 0.0 {
        health.invincible = true;
    }
    if health.is_defeated() {
        DamageOutcome::Defeated
    } else {
        DamageOutcome::Damaged {
            remaining: health.current,
        }
    }
}
