mod builder;
mod state;
#[cfg(test)]
mod tests;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use crate::conversation::ConversationMessage;
use crate::error::ControllerClosedError;
pub use builder::{ControllerBuilder, ReplyDelay};
use state::{Command, ControllerState, run_controller};

/// Handle to the conversation controller.
///
/// The controller is a single logical actor running on its own task:
/// commands are delivered over a channel and handled one at a time, so
/// no locking is needed anywhere in the conversation state. It owns
/// the transcript and the two-state machine that schedules assistant
/// replies: submissions while a reply is pending are silently
/// rejected, and a reset cancels the pending reply before reseeding
/// the transcript. A reply whose timer already fired when the reset
/// landed is dropped on arrival instead of being appended.
pub struct Controller {
    cmd_tx: mpsc::UnboundedSender<Command>,
    kill_tx: watch::Sender<bool>,
}

impl Controller {
    pub(crate) fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);

        // The state holds a weak sender so that dropping every handle
        // lets the controller task terminate on its own.
        let state = ControllerState::from_builder(builder, cmd_tx.downgrade());
        tokio::spawn(
            run_controller(state, cmd_rx, kill_rx)
                .instrument(trace_span!("controller")),
        );

        Self { cmd_tx, kill_tx }
    }

    /// Submits a user message.
    ///
    /// The input is trimmed first; whitespace-only submissions and
    /// submissions made while a reply is pending are silent no-ops.
    /// Control phrases ("clear conversation", "clear chat") perform
    /// the reset transition instead of producing a reply.
    pub fn submit<S: Into<String>>(
        &self,
        input: S,
    ) -> Result<(), ControllerClosedError> {
        self.send(Command::Submit(input.into()))
    }

    /// Resets the transcript back to the single seeded greeting,
    /// cancelling any pending reply.
    pub fn reset(&self) -> Result<(), ControllerClosedError> {
        self.send(Command::Reset)
    }

    /// Returns a snapshot of the transcript.
    ///
    /// Snapshots travel through the same command channel as
    /// submissions, so a snapshot requested after a submit observes
    /// that submit's effect.
    pub async fn transcript(
        &self,
    ) -> Result<Vec<ConversationMessage>, ControllerClosedError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| ControllerClosedError)
    }

    /// Attempts to shut the controller down.
    ///
    /// The controller is not guaranteed to stop immediately, but it
    /// will stop handling further commands and quit soon; a pending
    /// reply is cancelled on the way out.
    #[inline]
    pub fn close(&self) {
        self.kill_tx.send(true).ok();
    }

    #[inline]
    fn send(&self, cmd: Command) -> Result<(), ControllerClosedError> {
        self.cmd_tx.send(cmd).map_err(|_| ControllerClosedError)
    }
}

impl Clone for Controller {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            kill_tx: self.kill_tx.clone(),
        }
    }
}
