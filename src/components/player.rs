//! Player actor component.

use bevy_ecs::prelude::Component;

/// Tunables and transient state for the player actor.
///
/// Cooldowns tick with scaled time, so slow motion also slows the attack
/// rate.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub attack_cooldown: f32,
    pub cooldown_remaining: f32,
    /// Hit-flash duration sent to the presenter when damaged.
    pub flash: f32,
    /// Radius of the body, used to stop dash teleports short of walls.
    pub radius: f32,
}

impl Player {
    pub fn can_attack(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }
}
