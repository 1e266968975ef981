//! Projectile component.
//!
//! A bullet flies along its [`Rotation`](crate::components::rotation::Rotation)
//! at `speed` units per scaled second. When its age reaches `lifespan` or it
//! hits something, it is soft-disabled: it stops moving and colliding but
//! stays allocated for `trail` seconds so the presenter can fade its trail,
//! then it returns to the bullet pool.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    pub speed: f32,
    pub lifespan: f32,
    pub age: f32,
    pub trail: f32,
}

impl Bullet {
    pub fn new(speed: f32, lifespan: f32, trail: f32) -> Self {
        Self {
            speed,
            lifespan,
            age: 0.0,
            trail,
        }
    }

    pub fn expired(&self) -> bool {
        self.age >= self.lifespan
    }

    /// Apply a redirect: speed is multiplied and the lifespan restarts.
    pub fn redirect(&mut self, speed_multiplier: f32) {
        self.speed *= speed_multiplier;
        self.age = 0.0;
    }
}
