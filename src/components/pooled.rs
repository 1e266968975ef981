//! Pool bookkeeping components.
//!
//! Every entity handed out by [`EntityPools`](crate::resources::pool::EntityPools)
//! carries [`Pooled`]. Entities waiting in a pool carry [`Inactive`] and are
//! skipped by every gameplay query. [`Spent`] marks a bullet that has been
//! soft-disabled and is only waiting for its trail to fade.

use bevy_ecs::prelude::Component;

use crate::resources::pool::PoolKind;

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pooled {
    pub kind: PoolKind,
    /// Bumped on every acquire and release; deferred work and presenter
    /// callbacks carry it as a cancellation token.
    pub generation: u32,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Inactive;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Spent;
