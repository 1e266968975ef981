//! Session outcome events and observers.
//!
//! Defeats feed the live-enemy counter. The last enemy going down emits
//! [`PlayerWinEvent`]; the player going down emits [`GameOverEvent`]. Both
//! fully pause time on the spot and request the matching end state.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::faction::Faction;
use crate::events::combat::DefeatEvent;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::session::Session;
use crate::resources::timeauthority::TimeAuthority;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerWinEvent {}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverEvent {}

/// Count defeats and detect the end of the session.
pub fn defeat_observer(
    trigger: On<DefeatEvent>,
    mut session: ResMut<Session>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if session.is_over() {
        debug!("Defeat of {:?} after session end ignored", event.entity);
        return;
    }
    match event.faction {
        Faction::Enemy => {
            let last = session.record_enemy_defeat();
            info!(
                "Enemy {:?} defeated, {} remaining",
                event.entity, session.live_enemies
            );
            if last {
                commands.trigger(PlayerWinEvent {});
            }
        }
        Faction::Player => {
            info!("Player {:?} defeated", event.entity);
            commands.trigger(GameOverEvent {});
        }
    }
}

pub fn player_win_observer(
    _trigger: On<PlayerWinEvent>,
    mut session: ResMut<Session>,
    mut authority: ResMut<TimeAuthority>,
    mut next_state: ResMut<NextGameState>,
) {
    session.won = true;
    authority.full_pause();
    next_state.set(GameStates::Won);
    info!("All enemies defeated. Player wins after {} defeats", session.defeats);
}

pub fn game_over_observer(
    _trigger: On<GameOverEvent>,
    mut session: ResMut<Session>,
    mut authority: ResMut<TimeAuthority>,
    mut next_state: ResMut<NextGameState>,
) {
    session.lost = true;
    authority.full_pause();
    next_state.set(GameStates::GameOver);
    info!("Game over with {} enemies left", session.live_enemies);
}
