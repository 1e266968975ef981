//! Timeshift library.
//!
//! Headless core of a top-down 2D action game built around time: a single
//! time authority every system reads from, an energy-limited slow-motion
//! controller with a dash, hitstop on every landed hit, strike resolution
//! that deflects or reflects bullets, and pooled projectiles and effects.
//!
//! The crate exposes its ECS components, resources, systems, and events so
//! the session can be driven from the bundled binary, from integration
//! tests, or from an external frontend that supplies input and presents the
//! commands it is sent.

pub mod combat;
pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod placement;
pub mod resources;
pub mod systems;
