//! Single source of truth for the gameplay time multiplier.
//!
//! The effective scale is layered:
//!
//! 1. a **base scale**, written by pause/resume and slow motion (last writer
//!    wins),
//! 2. a **hitstop** overlay that forces the effective scale to 0 for a span
//!    of real time without touching the base,
//! 3. a **full pause** used by the pause menu, victory, and game over, which
//!    also stops real-time gameplay clocks.
//!
//! When a hitstop expires the effective scale falls back to whatever the base
//! is at that moment, so a slow-motion request made during the freeze takes
//! effect right after it.

use bevy_ecs::prelude::Resource;
use log::debug;

pub const PLAY_SCALE: f32 = 1.0;
pub const PAUSE_SCALE: f32 = 0.0;

/// An active hitstop countdown, in real seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hitstop {
    pub remaining: f32,
    pub duration: f32,
    /// Base scale when the freeze started.
    pub base_at_start: f32,
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct TimeAuthority {
    base_scale: f32,
    slow_scale: f32,
    hitstop: Option<Hitstop>,
    /// Base scale to restore on [`TimeAuthority::full_resume`].
    full_pause: Option<f32>,
}

impl Default for TimeAuthority {
    fn default() -> Self {
        Self::new(0.2)
    }
}

impl TimeAuthority {
    pub fn new(slow_scale: f32) -> Self {
        Self {
            base_scale: PLAY_SCALE,
            slow_scale: slow_scale.clamp(0.0, 1.0),
            hitstop: None,
            full_pause: None,
        }
    }

    /// Multiplier every per-tick consumer applies to its raw delta.
    pub fn effective_scale(&self) -> f32 {
        if self.hitstop.is_some() || self.full_pause.is_some() {
            PAUSE_SCALE
        } else {
            self.base_scale
        }
    }

    pub fn base_scale(&self) -> f32 {
        self.base_scale
    }

    pub fn slow_scale(&self) -> f32 {
        self.slow_scale
    }

    pub fn hitstop(&self) -> Option<&Hitstop> {
        self.hitstop.as_ref()
    }

    pub fn is_hitstop_active(&self) -> bool {
        self.hitstop.is_some()
    }

    pub fn is_fully_paused(&self) -> bool {
        self.full_pause.is_some()
    }

    pub fn is_slowed(&self) -> bool {
        self.base_scale > PAUSE_SCALE && self.base_scale < PLAY_SCALE
    }

    /// Write the base scale. Allowed during hitstop; ignored during a full
    /// pause.
    pub fn set_base_scale(&mut self, value: f32) {
        if self.full_pause.is_some() {
            debug!("set_base_scale({value}) ignored during full pause");
            return;
        }
        self.base_scale = value.clamp(PAUSE_SCALE, PLAY_SCALE);
    }

    pub fn pause(&mut self) {
        self.set_base_scale(PAUSE_SCALE);
    }

    /// Restore the base scale to 1.0.
    ///
    /// A no-op while a hitstop or a full pause is active; returns whether
    /// the base was written so callers can retry on a later tick.
    pub fn resume(&mut self) -> bool {
        if self.hitstop.is_some() || self.full_pause.is_some() {
            return false;
        }
        self.base_scale = PLAY_SCALE;
        true
    }

    /// Request slow motion at the configured slow scale.
    pub fn slow_down(&mut self) {
        self.set_base_scale(self.slow_scale);
    }

    /// Freeze gameplay for `duration` real seconds.
    ///
    /// Non-positive or non-finite durations are ignored. A hitstop triggered
    /// while one is running keeps the longer of the two remaining times.
    pub fn trigger_hitstop(&mut self, duration: f32) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        match self.hitstop.as_mut() {
            Some(active) => {
                if duration > active.remaining {
                    active.remaining = duration;
                    active.duration = duration;
                }
            }
            None => {
                self.hitstop = Some(Hitstop {
                    remaining: duration,
                    duration,
                    base_at_start: self.base_scale,
                });
            }
        }
    }

    /// Count the hitstop down by `real_dt`. Returns `true` on the tick it
    /// expires.
    pub fn advance(&mut self, real_dt: f32) -> bool {
        let Some(active) = self.hitstop.as_mut() else {
            return false;
        };
        active.remaining -= real_dt.max(0.0);
        if active.remaining <= 0.0 {
            let started_at = active.base_at_start;
            self.hitstop = None;
            debug!(
                "hitstop expired (base {} at start, {} now)",
                started_at, self.base_scale
            );
            return true;
        }
        false
    }

    /// Freeze everything, real-time clocks included.
    pub fn full_pause(&mut self) {
        if self.full_pause.is_none() {
            self.full_pause = Some(self.base_scale);
        }
        self.base_scale = PAUSE_SCALE;
    }

    /// Leave a full pause, restoring the base scale from before it.
    pub fn full_resume(&mut self) {
        if let Some(previous) = self.full_pause.take() {
            self.base_scale = previous;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.slow_scale);
    }
}
