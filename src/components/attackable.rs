use bevy_ecs::prelude::Component;

/// Capability marker: the entity can be redirected by an attack.
///
/// Bullets carry it; slashes, dash sweeps, and actor bodies resolve against
/// it through [`crate::combat::resolve_strike`].
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Attackable;
