//! Messages exchanged with the presenter.
//!
//! Rendering and animation live outside the simulation. Gameplay writes
//! fire-and-forget [`PresentationCmd`]s; the presenter answers with a single
//! kind of [`PresentationMessage`], "this clip finished", tagged with the
//! pool generation it was started for so stale answers can be dropped.

use bevy_ecs::message::Message;
use bevy_ecs::prelude::Entity;

use crate::components::vfx::VfxClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Slash,
    EnemyWindup,
    Hit,
    Dash,
}

impl From<VfxClip> for Clip {
    fn from(clip: VfxClip) -> Self {
        match clip {
            VfxClip::Hit => Clip::Hit,
            VfxClip::Dash => Clip::Dash,
        }
    }
}

impl Clip {
    /// Clips whose end the simulation waits for.
    pub fn reports_finished(self) -> bool {
        matches!(self, Clip::Hit | Clip::Dash)
    }
}

/// Commands sent *to* the presenter.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum PresentationCmd {
    Play {
        entity: Entity,
        token: u32,
        clip: Clip,
    },
    HitFlash {
        entity: Entity,
        duration: f32,
    },
    Shutdown,
}

/// Messages sent *back* from the presenter.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationMessage {
    Finished { entity: Entity, token: u32 },
}
