//! Time update.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per tick from the
//! [`TimeAuthority`](crate::resources::timeauthority::TimeAuthority), before
//! any gameplay system runs, so every reader in the tick sees the same scale.
use bevy_ecs::prelude::*;

use crate::resources::timeauthority::TimeAuthority;
use crate::resources::worldtime::WorldTime;

/// Snapshot the effective scale and advance the hitstop countdown.
///
/// `dt` is the unscaled tick delta in seconds. The scale is read before the
/// hitstop countdown advances, so every tick that starts inside a hitstop
/// window is fully frozen. During a full pause both deltas are zero and the
/// hitstop countdown does not move.
pub fn update_world_time(world: &mut World, dt: f32) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    let (scale, real_dt) = {
        let mut authority = world.resource_mut::<TimeAuthority>();
        if authority.is_fully_paused() {
            (0.0, 0.0)
        } else {
            let scale = authority.effective_scale();
            authority.advance(dt);
            (scale, dt)
        }
    };

    let mut wt = world.resource_mut::<WorldTime>();
    let scaled_dt = real_dt * scale;
    wt.time_scale = scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.real_delta = real_dt;
    wt.frame_count += 1;
}
