//! Collision event.
//!
//! [`collision_detector`](crate::systems::collision::collision_detector)
//! emits a [`CollisionEvent`] whenever an attack carrier (a slash or a live
//! bullet) touches something it can affect. The
//! [`collision_observer`](crate::systems::collision::collision_observer)
//! decides what the contact means.
use bevy_ecs::prelude::*;

/// Event fired when an attack carrier touches another entity.
///
/// `a` is always the carrier (slash or bullet), `b` whatever it touched.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
}
