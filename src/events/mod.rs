//! Event types and observers.
//!
//! Gameplay systems talk to each other through observer events rather than
//! direct calls: the collision system reports contacts, the combat observer
//! turns them into hits and defeats, and the session observers decide when
//! the session is over. The presenter thread is reached through ECS
//! messages instead.
//!
//! Submodules:
//! - [`collision`] – contact between a moving carrier and another entity
//! - [`combat`] – attacks, landed hits, defeats, and player damage
//! - [`gamestate`] – state transition notifications for the session flow
//! - [`presentation`] – commands for and answers from the presenter thread
//! - [`session`] – win and game-over notifications and their observers
pub mod collision;
pub mod combat;
pub mod gamestate;
pub mod presentation;
pub mod session;
