//! ECS resources made available to systems.
//!
//! Long-lived, world-global data: the time model, pools and deferred work,
//! the collision snapshot, configuration, and session bookkeeping.
//!
//! Overview
//! - `arena` – arena bounds, walls, player start, and pool template overrides
//! - `deferred` – delayed continuations keyed by owner and pool generation
//! - `gameconfig` – tunables loaded from an INI file
//! - `gamestate` – authoritative and pending high-level session state
//! - `input` – raw per-tick device state and its edge-aware decoding
//! - `physics` – collision oracle trait and the arena snapshot implementing it
//! - `pool` – recycled entity pools with generation tokens
//! - `presentation` – bridge and channels for the presenter thread
//! - `session` – live-enemy counter, outcome flags, and seeded RNG
//! - `sessionsystems` – registered one-shot systems run outside the schedule
//! - `timeauthority` – base scale, hitstop overlay, and full pause
//! - `worldtime` – scaled and real tick deltas
pub mod arena;
pub mod deferred;
pub mod gameconfig;
pub mod gamestate;
pub mod input;
pub mod physics;
pub mod pool;
pub mod presentation;
pub mod session;
pub mod sessionsystems;
pub mod timeauthority;
pub mod worldtime;
