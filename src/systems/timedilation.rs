//! Time-dilation controller system.
//!
//! Feeds the dilation button into each player's
//! [`TimeDilation`](crate::components::timedilation::TimeDilation) state
//! machine and mirrors the result onto the
//! [`TimeAuthority`](crate::resources::timeauthority::TimeAuthority):
//!
//! - while Active, the (possibly eased) slow scale is written every tick;
//! - after leaving Active, `resume()` is retried every tick until it
//!   succeeds, so a release during hitstop takes effect once the freeze ends.
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::player::Player;
use crate::components::timedilation::{DilationTransition, TimeDilation};
use crate::resources::input::InputState;
use crate::resources::timeauthority::TimeAuthority;
use crate::resources::worldtime::WorldTime;

pub fn time_dilation_system(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut authority: ResMut<TimeAuthority>,
    mut query: Query<(Entity, &mut TimeDilation), With<Player>>,
) {
    for (entity, mut dilation) in query.iter_mut() {
        match dilation.tick(input.dilation.active, time.real_delta) {
            DilationTransition::Activated => {
                dilation.owes_resume = true;
                info!("Time dilation on for {:?}", entity);
            }
            DilationTransition::Released => {
                debug!(
                    "Time dilation released at {:.2} energy",
                    dilation.energy.ratio()
                );
            }
            DilationTransition::Starved => info!("Time dilation ran out of energy"),
            DilationTransition::Recharged => debug!("Time dilation recharged"),
            DilationTransition::None => {}
        }

        if dilation.is_active() {
            authority.set_base_scale(dilation.current_slow_scale());
        } else if dilation.owes_resume && authority.resume() {
            dilation.owes_resume = false;
        }
    }
}
