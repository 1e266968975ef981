//! Melee slash component.
//!
//! A slash is a short-lived circle spawned in front of the player. It hits
//! each entity at most once during its lifespan.

use bevy_ecs::prelude::{Component, Entity};
use smallvec::SmallVec;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct Slash {
    pub lifespan: f32,
    pub age: f32,
    /// Entities already struck by this swing.
    pub hits: SmallVec<[Entity; 8]>,
}

impl Slash {
    pub fn new(lifespan: f32) -> Self {
        Self {
            lifespan,
            age: 0.0,
            hits: SmallVec::new(),
        }
    }

    /// Record `entity` as hit. Returns `false` if it was already hit.
    pub fn register_hit(&mut self, entity: Entity) -> bool {
        if self.hits.contains(&entity) {
            return false;
        }
        self.hits.push(entity);
        true
    }
}
