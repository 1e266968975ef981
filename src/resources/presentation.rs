//! ECS resources that bridge the simulation with an external presenter
//! thread.
//!
//! Use [`setup_presentation`] once during initialization to spawn the
//! presenter and insert the [`PresentationBridge`] and message resources.
//! Call [`shutdown_presentation`] during teardown to stop the thread.

use crate::events::presentation::{PresentationCmd, PresentationMessage};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the presenter thread.
#[derive(Resource)]
pub struct PresentationBridge {
    /// Sender for [`PresentationCmd`] messages (ECS -> presenter).
    pub tx_cmd: Sender<PresentationCmd>,
    /// Receiver for [`PresentationMessage`] messages (presenter -> ECS).
    pub rx_msg: Receiver<PresentationMessage>,
    /// Join handle for the presenter thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn `presenter` on its own thread and register bridge resources.
pub fn setup_presentation<F>(world: &mut World, presenter: F)
where
    F: FnOnce(Receiver<PresentationCmd>, Sender<PresentationMessage>) + Send + 'static,
{
    let (tx_cmd, rx_cmd) = unbounded::<PresentationCmd>();
    let (tx_msg, rx_msg) = unbounded::<PresentationMessage>();

    let handle = std::thread::spawn(move || presenter(rx_cmd, tx_msg));

    world.insert_resource(PresentationBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    init_presentation_messages(world);
}

/// Insert the message queues without a presenter thread. Effect clips then
/// finish on the tick after they start and every other command is dropped.
pub fn init_presentation_messages(world: &mut World) {
    world.init_resource::<Messages<PresentationMessage>>();
    world.init_resource::<Messages<PresentationCmd>>();
}

/// Ask the presenter thread to stop and join it.
pub fn shutdown_presentation(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<PresentationBridge>() {
        let _ = bridge.tx_cmd.send(PresentationCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}
