//! Session state transition event and observer.
//!
//! Systems and observers request a change to the high-level [`GameStates`]
//! by updating [`NextGameState`]. `check_pending_state` then emits a
//! [`GameStateChangedEvent`], and the observer in this module applies the
//! transition to [`GameState`] and runs the enter/exit hooks.
//!
//! The hooks are where pausing meets the time model: entering `Paused`,
//! `Won`, or `GameOver` puts the [`TimeAuthority`] into a full pause, and
//! leaving `Paused` lifts it.
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::timeauthority::TimeAuthority;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending state transition should be applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending state transition.
///
/// Contract
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], runs the exit hook
///   of the old state and the enter hook of the new one, and resets
///   [`NextGameState`] to [`Unchanged`].
/// - If any required resource is missing, logs a diagnostic and returns.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut next_game_state: Option<ResMut<NextGameState>>,
    mut game_state: Option<ResMut<GameState>>,
    mut authority: Option<ResMut<TimeAuthority>>,
) {
    debug!("GameStateChangedEvent triggered");

    if let (Some(next_game_state), Some(game_state), Some(authority)) = (
        next_game_state.as_deref_mut(),
        game_state.as_deref_mut(),
        authority.as_deref_mut(),
    ) {
        // Clone the next state value first so we don't keep an immutable borrow while mutating.
        let next_state_value = next_game_state.get().clone();
        match next_state_value {
            Pending(new_state) => {
                let old_state = game_state.get().clone();
                info!("Transitioning from {:?} to {:?}", old_state, new_state);
                game_state.set(new_state.clone());
                next_game_state.reset();
                on_state_exit(&old_state, &new_state, authority);
                on_state_enter(&new_state, authority);
            }
            Unchanged => {
                debug!("No state change pending.");
            }
        }
    } else {
        warn!(
            "One or more resources missing in observe_gamestate_change_event. next_state: {:?}, game_state: {:?}, authority: {:?}",
            next_game_state.is_some(),
            game_state.is_some(),
            authority.is_some()
        );
    }
}

fn on_state_enter(state: &GameStates, authority: &mut TimeAuthority) {
    match state {
        GameStates::Paused | GameStates::Won | GameStates::GameOver => {
            authority.full_pause();
            debug!("Entered {:?}: time fully paused", state);
        }
        other => debug!("Entered {:?} state", other),
    }
}

fn on_state_exit(state: &GameStates, next: &GameStates, authority: &mut TimeAuthority) {
    match state {
        GameStates::Paused if *next == GameStates::Playing => {
            authority.full_resume();
            debug!("Exited Paused state: time resumed");
        }
        other => debug!("Exited {:?} state", other),
    }
}
