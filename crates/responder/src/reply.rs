use serde::{Deserialize, Serialize};

/// What the caller should do with a matched reply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAction {
    /// Deliver the reply text as an assistant message.
    #[default]
    Respond,
    /// Reset the transcript back to its seed state. The reply text is
    /// advisory only; a reset transcript never shows it.
    ClearTranscript,
}

/// The outcome of selecting a response for one user input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reply {
    /// The response text. Never empty.
    pub text: String,
    /// How the caller should treat this reply.
    pub action: ReplyAction,
}

impl Reply {
    /// Creates a plain text reply with the [`ReplyAction::Respond`]
    /// action.
    #[inline]
    pub fn respond<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            action: ReplyAction::Respond,
        }
    }
}

/// A type that maps one user input to one reply.
///
/// Implementations must be total and side-effect free: every input
/// string (including garbage) produces a defined reply, and calling
/// [`respond`](Responder::respond) twice with the same input yields
/// the same reply.
pub trait Responder: Send + Sync {
    /// Selects the reply for the given input.
    ///
    /// The input is expected to be pre-trimmed and non-empty; the
    /// conversation controller rejects blank submissions before they
    /// reach the responder.
    fn respond(&self, input: &str) -> Reply;
}
