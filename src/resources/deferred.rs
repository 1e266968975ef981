//! Deferred continuations on the tick loop.
//!
//! Work that has to happen "in N seconds" (fully returning a soft-disabled
//! bullet, closing an invincibility window, firing after an enemy wind-up) is
//! queued here instead of running on its own timer. Each task names its
//! owner and, for pooled owners, the owner's pool generation. When the owner
//! is recycled the generation changes and the task is dropped without
//! running. Tasks can also be cancelled explicitly.

use bevy_ecs::prelude::*;

/// Which clock a task counts down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clock {
    /// Scaled gameplay time; frozen by hitstop and slowed by dilation.
    Scaled,
    /// Real time; only a full pause stops it.
    Real,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredAction {
    /// Return the owner to its pool.
    Release,
    /// Clear the owner's invincibility flag.
    EndInvincibility,
    /// Fire the owner's bullet at the end of a wind-up.
    EnemyShoot,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeferredTask {
    pub owner: Entity,
    /// Pool generation the task was scheduled against.
    pub token: Option<u32>,
    pub remaining: f32,
    pub clock: Clock,
    pub action: DeferredAction,
}

#[derive(Resource, Default, Debug)]
pub struct DeferredQueue {
    tasks: Vec<DeferredTask>,
}

impl DeferredQueue {
    pub fn schedule(
        &mut self,
        owner: Entity,
        token: Option<u32>,
        delay: f32,
        clock: Clock,
        action: DeferredAction,
    ) {
        self.tasks.push(DeferredTask {
            owner,
            token,
            remaining: delay.max(0.0),
            clock,
            action,
        });
    }

    /// Drop every pending task of `owner`. Returns how many were removed.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.owner != owner);
        before - self.tasks.len()
    }

    pub fn cancel(&mut self, owner: Entity, action: DeferredAction) {
        self.tasks
            .retain(|t| !(t.owner == owner && t.action == action));
    }

    pub fn is_pending(&self, owner: Entity, action: DeferredAction) -> bool {
        self.tasks
            .iter()
            .any(|t| t.owner == owner && t.action == action)
    }

    /// Count every task down and remove those that came due, in the order
    /// they were scheduled.
    pub fn advance(&mut self, scaled_dt: f32, real_dt: f32) -> Vec<DeferredTask> {
        let mut due = Vec::new();
        self.tasks.retain_mut(|task| {
            task.remaining -= match task.clock {
                Clock::Scaled => scaled_dt,
                Clock::Real => real_dt,
            };
            if task.remaining <= 0.0 {
                due.push(*task);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
