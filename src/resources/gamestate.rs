//! High-level session state resources.
//!
//! These resources track the authoritative current state of the session and
//! any pending transition requested by systems or observers. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied.

use bevy_ecs::prelude::Resource;

/// Discrete high-level states the session can be in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    Setup,
    Playing,
    Paused,
    Won,
    GameOver,
}

impl GameStates {
    /// Win and game over end the session; only a reset leaves them.
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStates::Won | GameStates::GameOver)
    }
}

/// Representation of a requested next state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }

    pub fn get(&self) -> &GameStates {
        &self.current
    }

    /// Update the current state immediately, skipping enter/exit hooks.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new state.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Request a transition to `next`. `check_pending_state` picks it up on
    /// the next tick.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}
