//! Marker for entities that survive a session reset.
//!
//! [`crate::game::reset_session`] despawns every gameplay entity and then
//! re-runs setup. Global observers are spawned with [`Persistent`] so they
//! stay registered across resets.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug)]
pub struct Persistent;
