//! Energy-gated slow-motion controller.
//!
//! [`TimeDilation`] lives on the player. While the dilation ability is held
//! and energy remains, the controller asks the
//! [`TimeAuthority`](crate::resources::timeauthority::TimeAuthority) for the
//! slow scale. Energy drains and refills on real time so slow motion never
//! stretches its own budget.
//!
//! # States
//!
//! ```text
//!   Idle ──held && ratio > 0──▶ Active ──released / empty / dash──▶ Recovering
//!    ▲                                                                 │
//!    └─────────────────────────── ratio == 1.0 ◀───────────────────────┘
//! ```
//!
//! Reactivation is blocked for the whole of `Recovering`, so a partially
//! refilled bar cannot be used.

use bevy_ecs::prelude::Component;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DilationState {
    #[default]
    Idle,
    Active,
    Recovering,
}

/// What changed during a call to [`TimeDilation::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DilationTransition {
    None,
    /// Idle → Active.
    Activated,
    /// Active → Recovering because the button was let go.
    Released,
    /// Active → Recovering because energy ran out.
    Starved,
    /// Recovering → Idle.
    Recharged,
}

/// Energy pool backing the ability. The ratio is clamped to `[0, 1]` on every
/// write.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyResource {
    ratio: f32,
    /// Ratio lost per real second while Active.
    pub depletion_rate: f32,
    /// Ratio gained per real second while Recovering.
    pub regen_rate: f32,
    /// Set while the bar is refilling and cannot be used.
    pub cooldown: bool,
}

impl EnergyResource {
    /// Build from the seconds a full bar lasts and the seconds an empty bar
    /// takes to refill. Non-positive durations act instantly.
    pub fn from_durations(max_duration: f32, recharge_duration: f32) -> Self {
        Self {
            ratio: 1.0,
            depletion_rate: rate_for(max_duration),
            regen_rate: rate_for(recharge_duration),
            cooldown: false,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn set_ratio(&mut self, value: f32) {
        self.ratio = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
    }

    pub fn deplete(&mut self, real_dt: f32) {
        self.set_ratio(self.ratio - self.depletion_rate * real_dt.max(0.0));
    }

    pub fn regenerate(&mut self, real_dt: f32) {
        self.set_ratio(self.ratio + self.regen_rate * real_dt.max(0.0));
    }

    pub fn is_empty(&self) -> bool {
        self.ratio <= 0.0
    }

    pub fn is_full(&self) -> bool {
        self.ratio >= 1.0
    }
}

fn rate_for(duration: f32) -> f32 {
    if duration > 0.0 {
        1.0 / duration
    } else {
        f32::INFINITY
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TimeDilation {
    state: DilationState,
    pub energy: EnergyResource,
    pub slow_scale: f32,
    /// Below this energy ratio the slow scale eases linearly back to 1.0.
    pub ramp_threshold: f32,
    pub dash_range: f32,
    pub dash_width: f32,
    /// The controller has written a slow scale that still needs undoing.
    pub owes_resume: bool,
}

impl TimeDilation {
    pub fn new(
        energy: EnergyResource,
        slow_scale: f32,
        ramp_threshold: f32,
        dash_range: f32,
        dash_width: f32,
    ) -> Self {
        Self {
            state: DilationState::Idle,
            energy,
            slow_scale: slow_scale.clamp(0.0, 1.0),
            ramp_threshold: ramp_threshold.clamp(0.0, 1.0),
            dash_range,
            dash_width,
            owes_resume: false,
        }
    }

    pub fn state(&self) -> DilationState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == DilationState::Active
    }

    /// Advance the state machine by one tick of real time.
    pub fn tick(&mut self, held: bool, real_dt: f32) -> DilationTransition {
        match self.state {
            DilationState::Idle => {
                if held && !self.energy.is_empty() {
                    self.state = DilationState::Active;
                    return DilationTransition::Activated;
                }
                DilationTransition::None
            }
            DilationState::Active => {
                if !held {
                    self.enter_recovering();
                    return DilationTransition::Released;
                }
                self.energy.deplete(real_dt);
                if self.energy.is_empty() {
                    self.enter_recovering();
                    return DilationTransition::Starved;
                }
                DilationTransition::None
            }
            DilationState::Recovering => {
                self.energy.regenerate(real_dt);
                if self.energy.is_full() {
                    self.energy.cooldown = false;
                    self.state = DilationState::Idle;
                    return DilationTransition::Recharged;
                }
                DilationTransition::None
            }
        }
    }

    /// Spend the whole bar on a dash. Only possible while Active.
    pub fn spend_for_dash(&mut self) -> bool {
        if self.state != DilationState::Active {
            return false;
        }
        self.energy.set_ratio(0.0);
        self.enter_recovering();
        true
    }

    /// Slow scale to request this tick, easing out as energy runs low.
    pub fn current_slow_scale(&self) -> f32 {
        let ratio = self.energy.ratio();
        if self.ramp_threshold <= 0.0 || ratio >= self.ramp_threshold {
            return self.slow_scale;
        }
        let t = 1.0 - ratio / self.ramp_threshold;
        self.slow_scale + (1.0 - self.slow_scale) * t
    }

    /// Back to a full, idle bar.
    pub fn reset(&mut self) {
        self.state = DilationState::Idle;
        self.energy.set_ratio(1.0);
        self.energy.cooldown = false;
        self.owes_resume = false;
    }

    fn enter_recovering(&mut self) {
        self.state = DilationState::Recovering;
        self.energy.cooldown = true;
    }
}
