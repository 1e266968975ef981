//! One-shot systems the session runs outside the tick schedule.
//!
//! In bevy_ecs 0.18 registered systems live on entities, so the ids kept
//! here point at entities marked
//! [`Persistent`](crate::components::persistent::Persistent); a session
//! reset leaves them alone.

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;

#[derive(Resource, Debug, Clone, Copy)]
pub struct SessionSystems {
    /// Builds pools, walls, the player, and the enemies of a fresh session.
    pub setup: SystemId,
}
