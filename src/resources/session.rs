//! Session bookkeeping.

use bevy_ecs::prelude::*;

/// Live-enemy counter and outcome flags for the running session.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub live_enemies: usize,
    pub defeats: usize,
    pub player: Option<Entity>,
    pub won: bool,
    pub lost: bool,
}

impl Session {
    /// Record an enemy defeat. Returns `true` when it was the last one.
    pub fn record_enemy_defeat(&mut self) -> bool {
        self.defeats += 1;
        self.live_enemies = self.live_enemies.saturating_sub(1);
        self.live_enemies == 0
    }

    pub fn is_over(&self) -> bool {
        self.won || self.lost
    }
}

/// Session random source. Seeded from the CLI so runs are reproducible.
#[derive(Resource, Debug, Clone)]
pub struct SessionRng(pub fastrand::Rng);

impl SessionRng {
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for SessionRng {
    fn default() -> Self {
        Self(fastrand::Rng::new())
    }
}
