//! Damageable capability.
//!
//! An entity with [`Health`] can be damaged by attacks of the opposite
//! faction. At zero health it is returned to its pool (enemies) or ends the
//! session (player). See [`crate::combat::resolve_damage`].

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Health {
    pub current: i32,
    pub max: i32,
    /// While set, every damage attempt is ignored.
    pub invincible: bool,
    /// Real-time seconds of invincibility granted after each hit. Zero
    /// disables the window.
    pub invincibility_window: f32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
            invincible: false,
            invincibility_window: 0.0,
        }
    }

    pub fn with_invincibility_window(mut self, seconds: f32) -> Self {
        self.invincibility_window = seconds.max(0.0);
        self
    }

    pub fn is_defeated(&self) -> bool {
        self.current <= 0
    }
}
