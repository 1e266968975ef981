use bevy_ecs::prelude::Component;

/// Which side an entity fights for.
///
/// Bullets and slashes carry the faction of whoever last launched or
/// redirected them; damage between equal factions is always ignored.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Faction {
    Player,
    Enemy,
}

impl Faction {
    pub fn opposite(self) -> Self {
        match self {
            Faction::Player => Faction::Enemy,
            Faction::Enemy => Faction::Player,
        }
    }
}
