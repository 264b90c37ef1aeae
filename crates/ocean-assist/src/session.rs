use ocean_assist_core::conversation::ConversationMessage;
use ocean_assist_core::{
    Controller, ControllerBuilder, ControllerClosedError, ReplyDelay,
};
use ocean_assist_responder::{GREETING, KeywordResponder, Responder};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    controller_builder: ControllerBuilder,
}

impl Default for SessionBuilder {
    #[inline]
    fn default() -> Self {
        Self::with_responder(KeywordResponder)
    }
}

impl SessionBuilder {
    /// Creates a session builder with a specified responder.
    ///
    /// Most callers want [`SessionBuilder::default`], which uses the
    /// canned keyword responder.
    pub fn with_responder<R: Responder + 'static>(responder: R) -> Self {
        let controller_builder = ControllerBuilder::with_responder(responder);
        Self { controller_builder }
    }

    /// Overrides the reply delay policy.
    #[inline]
    pub fn with_reply_delay(mut self, delay: ReplyDelay) -> Self {
        self.controller_builder =
            self.controller_builder.with_reply_delay(delay);
        self
    }

    /// Attaches a callback to be invoked for every appended message.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&ConversationMessage) + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder =
            self.controller_builder.on_message(on_message);
        self
    }

    /// Attaches a callback to be invoked when the session is idle.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let controller = self.controller_builder.build();
        Session { controller }
    }
}

/// A chat session, like a window that displays messages and has an
/// input box.
///
/// The session holds a fully configured conversation controller that
/// you can use directly, and it is basically a wrapper around
/// [`Controller`].
pub struct Session {
    controller: Controller,
}

impl Session {
    /// Sends a message to the session.
    #[inline]
    pub fn send_message(&self, message: &str) {
        self.controller.submit(message).ok();
    }

    /// Clears the conversation back to the greeting.
    #[inline]
    pub fn clear(&self) {
        self.controller.reset().ok();
    }

    /// Returns a snapshot of the conversation.
    #[inline]
    pub async fn transcript(
        &self,
    ) -> Result<Vec<ConversationMessage>, ControllerClosedError> {
        self.controller.transcript().await
    }

    /// The greeting every conversation starts with.
    #[inline]
    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Shuts the session down.
    #[inline]
    pub fn close(&self) {
        self.controller.close();
    }
}
