//! ECS components for entities.
//!
//! Components carry the per-entity data gameplay systems work on: where an
//! entity is and which way it faces, what it collides as, which side it
//! fights for, and the actor state of players, enemies, and pooled
//! projectiles and effects.
//!
//! Submodules overview:
//! - [`attackable`] – marker for entities a strike can redirect (bullets)
//! - [`boxcollider`] – axis-aligned rectangle used by walls
//! - [`bullet`] – projectile speed, lifespan, and trail
//! - [`collider`] – circle collider and the layer bits queries filter on
//! - [`enemy`] – turret AI state: range, cooldown, wind-up, target
//! - [`faction`] – player or enemy side
//! - [`health`] – hit points and invincibility window
//! - [`mapposition`] – world-space position
//! - [`persistent`] – marker for entities that survive a session reset
//! - [`player`] – player tunables and attack cooldown
//! - [`pooled`] – pool membership, generation, and inactive/spent markers
//! - [`rotation`] – heading in degrees and facing helpers
//! - [`slash`] – short-lived melee hit volume
//! - [`timedilation`] – energy-limited slow motion controller state
//! - [`vfx`] – fire-and-forget visual effect
//! - [`wall`] – static arena obstruction

pub mod attackable;
pub mod boxcollider;
pub mod bullet;
pub mod collider;
pub mod enemy;
pub mod faction;
pub mod health;
pub mod mapposition;
pub mod persistent;
pub mod player;
pub mod pooled;
pub mod rotation;
pub mod slash;
pub mod timedilation;
pub mod vfx;
pub mod wall;
