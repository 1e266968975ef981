//! Gameplay systems.
//!
//! Every system here reads its deltas from
//! [`WorldTime`](crate::resources::worldtime::WorldTime), never from the wall
//! clock, so slow motion, hitstop, and pauses apply uniformly. Observers that
//! react to combat events live next to the systems that emit them.
//!
//! Submodules overview
//! - [`collision`] – detect slash and bullet contacts and route them to attacks
//! - [`combat`] – apply resolved attacks: redirects, damage, defeats
//! - [`dash`] – dilation dash: sweep attack and teleport
//! - [`deferred`] – run delayed continuations that came due
//! - [`enemy`] – turret targeting, aiming, and wind-up
//! - [`gamestate`] – pending state transitions and the pause toggle
//! - [`hitstop`] – freeze time on every landed hit
//! - [`input`] – decode the raw input frame into [`crate::resources::input::InputState`]
//! - [`lifespan`] – expire slashes and bullets, soft-disable spent bullets
//! - [`movement`] – move projectiles along their heading
//! - [`physics`] – rebuild the collision snapshot from the ECS
//! - [`player`] – player movement, turning, and slash attacks
//! - [`presentation`] – bridge with the presenter thread and VFX recycling
//! - [`time`] – update simulation time from the time authority
//! - [`timedilation`] – drive the time authority from the dilation controller

pub mod collision;
pub mod combat;
pub mod dash;
pub mod deferred;
pub mod enemy;
pub mod gamestate;
pub mod hitstop;
pub mod input;
pub mod lifespan;
pub mod movement;
pub mod physics;
pub mod player;
pub mod presentation;
pub mod time;
pub mod timedilation;
