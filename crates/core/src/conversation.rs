//! Conversation-related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The author of a conversation message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The human side of the conversation.
    User,
    /// The assistant side of the conversation.
    Assistant,
}

/// A single message in the transcript.
///
/// Messages are immutable once created. They leave the transcript only
/// when the whole transcript is reset to its seed state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Unique identifier of this message.
    pub id: Uuid,
    /// The message text.
    pub content: String,
    /// Who authored the message.
    pub sender: Sender,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    fn new(sender: Sender, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// The ordered sequence of messages displayed to the user.
///
/// A transcript is never empty: it is seeded with one assistant
/// greeting on construction and grows strictly append-only until
/// [`reset`](Transcript::reset) returns it to the seed state.
#[derive(Debug)]
pub struct Transcript {
    greeting: String,
    messages: Vec<ConversationMessage>,
}

impl Transcript {
    /// Creates a transcript seeded with the given greeting.
    pub fn new<S: Into<String>>(greeting: S) -> Self {
        let mut transcript = Self {
            greeting: greeting.into(),
            messages: Vec::new(),
        };
        transcript.seed();
        transcript
    }

    fn seed(&mut self) {
        self.messages.push(ConversationMessage::new(
            Sender::Assistant,
            self.greeting.clone(),
        ));
    }

    /// Appends a message and returns a reference to it.
    pub(crate) fn push(
        &mut self,
        sender: Sender,
        content: String,
    ) -> &ConversationMessage {
        self.messages.push(ConversationMessage::new(sender, content));
        self.messages
            .last()
            .expect("transcript was appended one line above")
    }

    /// Drops every message and reseeds the greeting.
    pub(crate) fn reset(&mut self) {
        self.messages.clear();
        self.seed();
    }

    /// Returns the messages in order, oldest first.
    #[inline]
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// Returns the number of messages. At least 1 by construction.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always `false`: a transcript holds at least its seed greeting.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
