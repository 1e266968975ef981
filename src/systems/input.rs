//! Input system.
//!
//! [`update_input_state`] copies the driver-provided
//! [`InputFrame`](crate::resources::input::InputFrame) into
//! [`InputState`](crate::resources::input::InputState) each tick, computing
//! press/release edges.
use bevy_ecs::prelude::*;

use crate::resources::input::{InputFrame, InputState};

pub fn update_input_state(frame: Res<InputFrame>, mut input: ResMut<InputState>) {
    input.apply(&frame);
}
