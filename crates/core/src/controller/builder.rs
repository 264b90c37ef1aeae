use std::time::Duration;

use ocean_assist_responder::{GREETING, Responder};

use super::Controller;
use super::state::{IdleCallback, MessageCallback};
use crate::conversation::ConversationMessage;

/// How long the controller waits before delivering a reply.
///
/// The wait grows with the length of the submitted input and is
/// clamped to `max`, so long pastes stay bounded.
#[derive(Clone, Copy, Debug)]
pub struct ReplyDelay {
    /// The minimum wait, applied to every reply.
    pub base: Duration,
    /// Extra wait per character of input.
    pub per_char: Duration,
    /// Upper bound for the total wait.
    pub max: Duration,
}

impl Default for ReplyDelay {
    fn default() -> Self {
        Self {
            base: Duration::from_millis(600),
            per_char: Duration::from_millis(15),
            max: Duration::from_millis(2500),
        }
    }
}

impl ReplyDelay {
    /// A fixed wait regardless of input length.
    #[inline]
    pub fn fixed(delay: Duration) -> Self {
        Self {
            base: delay,
            per_char: Duration::ZERO,
            max: delay,
        }
    }

    pub(crate) fn for_input(&self, input: &str) -> Duration {
        // Cap the count before multiplying; `max` clamps the result
        // anyway and the input length is unbounded.
        let chars = input.chars().count().min(4096) as u32;
        (self.base + self.per_char * chars).min(self.max)
    }
}

/// [`Controller`] builder.
pub struct ControllerBuilder {
    pub(crate) responder: Box<dyn Responder>,
    pub(crate) greeting: String,
    pub(crate) delay: ReplyDelay,
    pub(crate) on_message: Option<MessageCallback>,
    pub(crate) on_idle: Option<IdleCallback>,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified responder.
    #[inline]
    pub fn with_responder<R: Responder + 'static>(responder: R) -> Self {
        Self {
            responder: Box::new(responder),
            greeting: GREETING.to_owned(),
            delay: ReplyDelay::default(),
            on_message: None,
            on_idle: None,
        }
    }

    /// Overrides the greeting the transcript is seeded with.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Overrides the reply delay policy.
    #[inline]
    pub fn with_reply_delay(mut self, delay: ReplyDelay) -> Self {
        self.delay = delay;
        self
    }

    /// Attaches a callback to be invoked for every message appended by
    /// a submission or a delivered reply. Seed greetings are not
    /// reported.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&ConversationMessage) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Box::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when the controller returns
    /// to the idle state.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the controller, spawning its task.
    #[inline]
    pub fn build(self) -> Controller {
        Controller::spawn_from_builder(self)
    }
}
