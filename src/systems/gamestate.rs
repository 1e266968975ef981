use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use crate::resources::input::InputState;
use bevy_ecs::prelude::*;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    // If a transition is pending, let the observer apply it
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}

/// Toggle between `Playing` and `Paused` on the pause button. Finished
/// sessions ignore it.
pub fn pause_toggle_system(
    input: Res<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    if !input.pause.just_pressed {
        return;
    }
    match state.get() {
        GameStates::Playing => next_state.set(GameStates::Paused),
        GameStates::Paused => next_state.set(GameStates::Playing),
        _ => {}
    }
}
