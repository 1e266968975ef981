//! Per-tick time snapshot.
//!
//! Written once at the start of every tick by
//! [`update_world_time`](crate::systems::time::update_world_time). Systems
//! read `delta` for gameplay (already scaled) and `real_delta` for anything
//! that must ignore slow motion and hitstop, such as energy and
//! invincibility windows.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the session started.
    pub elapsed: f32,
    /// Scaled seconds for this tick.
    pub delta: f32,
    /// Unscaled seconds for this tick. Zero while the session is fully paused.
    pub real_delta: f32,
    /// Effective scale that produced `delta`.
    pub time_scale: f32,
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            real_delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Snapshot with fixed deltas, mostly for tests driving one system.
    pub fn with_delta(delta: f32, real_delta: f32) -> Self {
        WorldTime {
            delta,
            real_delta,
            ..Default::default()
        }
    }
}
