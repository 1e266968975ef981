use bevy_ecs::prelude::Component;

/// Which presentation clip a pooled effect plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VfxClip {
    Hit,
    Dash,
}

/// Fire-and-forget visual effect. Returned to its pool when the presenter
/// reports the clip finished.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vfx {
    pub clip: VfxClip,
}
