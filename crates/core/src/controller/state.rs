use std::fmt::{self, Debug};

use ocean_assist_responder::{ReplyAction, Responder};
use tokio::select;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::builder::{ControllerBuilder, ReplyDelay};
use crate::conversation::{ConversationMessage, Sender, Transcript};

pub(crate) type MessageCallback =
    Box<dyn Fn(&ConversationMessage) + Send + Sync>;
pub(crate) type IdleCallback = Box<dyn Fn() + Send + Sync>;

/// The two stages of the conversation state machine.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
enum Stage {
    #[default]
    Idle,
    AwaitingResponse,
}

pub(crate) enum Command {
    Submit(String),
    Reset,
    DeliverReply(String),
    Snapshot(oneshot::Sender<Vec<ConversationMessage>>),
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit(input) => {
                f.debug_tuple("Submit").field(input).finish()
            }
            Self::Reset => f.write_str("Reset"),
            Self::DeliverReply(text) => {
                f.debug_tuple("DeliverReply").field(text).finish()
            }
            Self::Snapshot(_) => f.debug_tuple("Snapshot").finish(),
        }
    }
}

pub(crate) struct ControllerState {
    responder: Box<dyn Responder>,
    transcript: Transcript,
    stage: Stage,
    delay: ReplyDelay,
    pending_reply: Option<JoinHandle<()>>,
    cmd_tx: mpsc::WeakUnboundedSender<Command>,

    on_message: Option<MessageCallback>,
    on_idle: Option<IdleCallback>,
}

pub(crate) async fn run_controller(
    mut state: ControllerState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    loop {
        let cmd = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                cmd
            }
        };
        trace!("received command: {cmd:?}");
        state.handle(cmd);
    }
    state.abort_pending_reply();
    debug!("will terminate");
}

impl ControllerState {
    pub(crate) fn from_builder(
        builder: ControllerBuilder,
        cmd_tx: mpsc::WeakUnboundedSender<Command>,
    ) -> Self {
        let ControllerBuilder {
            responder,
            greeting,
            delay,
            on_message,
            on_idle,
        } = builder;

        Self {
            responder,
            transcript: Transcript::new(greeting),
            stage: Stage::default(),
            delay,
            pending_reply: None,
            cmd_tx,
            on_message,
            on_idle,
        }
    }

    pub(crate) fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Submit(input) => self.submit(input),
            Command::Reset => self.reset(),
            Command::DeliverReply(text) => self.deliver_reply(text),
            Command::Snapshot(tx) => {
                tx.send(self.transcript.messages().to_vec()).ok();
            }
        }
    }

    fn submit(&mut self, input: String) {
        let input = input.trim();
        if input.is_empty() {
            trace!("ignoring blank submission");
            return;
        }
        if self.stage != Stage::Idle {
            // The busy flag: while a reply is pending, new submissions
            // are rejected outright rather than queued.
            debug!("rejecting submission while a reply is pending");
            return;
        }

        // Consulted here only to classify the input; the reply text is
        // computed when the delivery fires.
        let reply = self.responder.respond(input);
        if reply.action == ReplyAction::ClearTranscript {
            self.reset();
            return;
        }

        self.push_message(Sender::User, input.to_owned());
        self.stage = Stage::AwaitingResponse;
        self.schedule_reply(input);
    }

    fn schedule_reply(&mut self, input: &str) {
        let delay = self.delay.for_input(input);
        trace!("scheduling reply in {delay:?}");

        let input = input.to_owned();
        let cmd_tx = self.cmd_tx.clone();
        self.pending_reply = Some(tokio::spawn(async move {
            sleep(delay).await;
            if let Some(cmd_tx) = cmd_tx.upgrade() {
                cmd_tx.send(Command::DeliverReply(input)).ok();
            }
        }));
    }

    fn deliver_reply(&mut self, input: String) {
        if self.stage != Stage::AwaitingResponse {
            // The delivery raced with a reset: the timer task had
            // already sent this command when the reset aborted it, and
            // the reset was handled first. The reply is stale and must
            // not land on the reseeded transcript.
            debug!("dropping a stale reply");
            return;
        }

        self.pending_reply = None;
        let reply = self.responder.respond(&input);
        self.push_message(Sender::Assistant, reply.text);
        self.stage = Stage::Idle;
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    /// The reset transition: cancel the pending reply, reseed the
    /// transcript, and return to idle.
    ///
    /// The abort is best-effort since the timer task may have fired
    /// already; the idle stage set here is what makes
    /// [`deliver_reply`](Self::deliver_reply) drop such a reply.
    fn reset(&mut self) {
        self.abort_pending_reply();
        self.transcript.reset();
        self.stage = Stage::Idle;
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn push_message(&mut self, sender: Sender, content: String) {
        let msg = self.transcript.push(sender, content);
        if let Some(on_message) = &self.on_message {
            on_message(msg);
        }
    }

    fn abort_pending_reply(&mut self) {
        if let Some(pending) = self.pending_reply.take() {
            debug!("cancelling the pending reply");
            pending.abort();
        }
    }
}
