use bevy_ecs::prelude::Component;

/// Static arena obstruction. Blocks line of sight, bullets, and dash teleports.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Wall;
