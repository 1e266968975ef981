//! Presentation bridge systems and the headless presenter.
//!
//! - [`forward_presentation_cmds`] pushes the tick's
//!   [`PresentationCmd`]s to the presenter thread, or finishes them in place
//!   when none is attached.
//! - [`poll_presentation_messages`] drains the presenter's answers into the
//!   ECS message queue.
//! - [`vfx_finished_system`] returns effects to their pool when their clip
//!   ends.
//! - [`logging_presenter`] is a presenter that renders nothing: it logs each
//!   command and immediately reports one-shot clips as finished.
//!
//! Keep the four bridge systems together and in order, like this:
//!
//! ```text
//! update_presentation_cmds -> forward_presentation_cmds
//!     -> poll_presentation_messages -> update_presentation_messages
//! ```
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender};
use log::debug;

use crate::components::vfx::Vfx;
use crate::events::presentation::{PresentationCmd, PresentationMessage};
use crate::resources::pool::EntityPools;
use crate::resources::presentation::PresentationBridge;

/// Drain pending answers from the presenter thread without blocking.
pub fn poll_presentation_messages(
    bridge: Option<Res<PresentationBridge>>,
    mut writer: MessageWriter<PresentationMessage>,
) {
    if let Some(bridge) = bridge {
        writer.write_batch(bridge.rx_msg.try_iter());
    }
}

/// Advance the ECS message queue for [`PresentationMessage`].
pub fn update_presentation_messages(mut msgs: ResMut<Messages<PresentationMessage>>) {
    msgs.update();
}

/// Forward this tick's commands to the presenter.
///
/// With no presenter attached, clips that report their end finish at once so
/// pooled effects still go back to their pool.
pub fn forward_presentation_cmds(
    bridge: Option<Res<PresentationBridge>>,
    mut reader: MessageReader<PresentationCmd>,
    mut finished: MessageWriter<PresentationMessage>,
) {
    for cmd in reader.read() {
        if let Some(bridge) = bridge.as_ref() {
            // Ignore send errors on shutdown
            let _ = bridge.tx_cmd.send(cmd.clone());
            continue;
        }
        match cmd {
            PresentationCmd::Play {
                entity,
                token,
                clip,
            } if clip.reports_finished() => {
                finished.write(PresentationMessage::Finished {
                    entity: *entity,
                    token: *token,
                });
            }
            other => debug!("No presenter attached, dropping {:?}", other),
        }
    }
}

/// Advance the ECS message queue for [`PresentationCmd`].
pub fn update_presentation_cmds(mut msgs: ResMut<Messages<PresentationCmd>>) {
    msgs.update();
}

/// Release effects whose clip finished. Answers for an earlier life of a
/// pooled entity are ignored.
pub fn vfx_finished_system(
    mut reader: MessageReader<PresentationMessage>,
    mut pools: ResMut<EntityPools>,
    effects: Query<(), With<Vfx>>,
    mut commands: Commands,
) {
    for msg in reader.read() {
        let PresentationMessage::Finished { entity, token } = *msg;
        if !effects.contains(entity) || !pools.is_current(entity, Some(token)) {
            debug!("Stale finished signal for {:?}", entity);
            continue;
        }
        pools.release(entity, &mut commands);
    }
}

/// Entry point of the headless presenter thread. Returns on
/// [`PresentationCmd::Shutdown`] or when the simulation side hangs up.
pub fn logging_presenter(rx_cmd: Receiver<PresentationCmd>, tx_msg: Sender<PresentationMessage>) {
    debug!(
        "presenter thread starting (id={:?})",
        std::thread::current().id()
    );
    for cmd in rx_cmd.iter() {
        match cmd {
            PresentationCmd::Play {
                entity,
                token,
                clip,
            } => {
                debug!("play {:?} on {:?}", clip, entity);
                if clip.reports_finished() {
                    let _ = tx_msg.send(PresentationMessage::Finished { entity, token });
                }
            }
            PresentationCmd::HitFlash { entity, duration } => {
                debug!("flash {:?} for {:.2}s", entity, duration);
            }
            PresentationCmd::Shutdown => break,
        }
    }
    debug!("presenter thread exiting");
}
