//! Decoded per-tick input.
//!
//! Device binding lives outside the crate. Whatever drives the session (the
//! headless autopilot, a test, a real frontend) writes the raw device state
//! for the coming tick into [`InputFrame`]; the
//! [`update_input_state`](crate::systems::input::update_input_state) system
//! turns it into edge-aware [`InputState`] for gameplay systems.
use bevy_ecs::prelude::*;
use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Boolean button state with press/release edges.
pub struct BoolState {
    /// Whether the button is held this tick.
    pub active: bool,
    /// Whether the button went down this tick.
    pub just_pressed: bool,
    /// Whether the button went up this tick.
    pub just_released: bool,
}

impl BoolState {
    /// Feed the raw level for this tick and recompute the edges.
    pub fn set(&mut self, down: bool) {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
    }
}

/// Raw device state for the next tick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub move_vector: Vec2,
    pub attack: bool,
    pub dilation: bool,
    pub pause: bool,
}

/// Resource capturing the per-tick input relevant to gameplay.
///
/// `attack` doubles as the dash trigger while dilation is active.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    /// Movement direction, length clamped to 1.
    pub move_vector: Vec2,
    pub attack: BoolState,
    pub dilation: BoolState,
    pub pause: BoolState,
}

impl InputState {
    pub fn apply(&mut self, frame: &InputFrame) {
        self.move_vector = frame.move_vector.clamp_length_max(1.0);
        self.attack.set(frame.attack);
        self.dilation.set(frame.dilation);
        self.pause.set(frame.pause);
    }
}
