//! Enemy AI component.
//!
//! Enemies stand still, turn towards the player once they can see it, and
//! fire a bullet after a short wind-up whenever their shot timer has run
//! past a randomized cooldown. The timer starts full so the first shot
//! happens as soon as the player is acquired.

use bevy_ecs::prelude::{Component, Entity};

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct EnemyAi {
    pub range: f32,
    pub rotate_speed: f32,
    pub base_cooldown: f32,
    pub jitter: f32,
    pub windup: f32,
    /// Cooldown rolled for the next shot (`base_cooldown ± jitter`).
    pub shot_cooldown: f32,
    /// Scaled seconds accumulated while a target is acquired.
    pub shot_timer: f32,
    /// A wind-up is in flight; cleared when the deferred shot fires.
    pub attacking: bool,
    pub target: Option<Entity>,
}

impl EnemyAi {
    pub fn new(range: f32, rotate_speed: f32, base_cooldown: f32, jitter: f32, windup: f32) -> Self {
        Self {
            range,
            rotate_speed,
            base_cooldown,
            jitter,
            windup,
            shot_cooldown: base_cooldown,
            shot_timer: base_cooldown,
            attacking: false,
            target: None,
        }
    }

    /// Roll the next cooldown from `rng` and restart the timer.
    pub fn reroll_cooldown(&mut self, rng: &mut fastrand::Rng) {
        let offset = (rng.f32() * 2.0 - 1.0) * self.jitter;
        self.shot_cooldown = (self.base_cooldown + offset).max(0.0);
        self.shot_timer = 0.0;
    }

    pub fn ready_to_fire(&self) -> bool {
        !self.attacking && self.shot_timer >= self.shot_cooldown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_shot_on_first_sight() {
        let ai = EnemyAi::new(10.0, 5.0, 5.0, 2.0, 0.5);
        assert!(ai.ready_to_fire());
    }

    #[test]
    fn test_reroll_stays_within_jitter() {
        let mut ai = EnemyAi::new(10.0, 5.0, 5.0, 2.0, 0.5);
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..100 {
            ai.reroll_cooldown(&mut rng);
            assert!((3.0..=7.0).contains(&ai.shot_cooldown));
            assert_eq!(ai.shot_timer, 0.0);
        }
    }
}
