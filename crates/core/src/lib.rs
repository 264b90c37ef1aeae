//! Core logic of the ocean data assistant: transcript bookkeeping and
//! the conversation state machine that schedules canned replies.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod controller;
pub mod conversation;
mod error;

pub use controller::{Controller, ControllerBuilder, ReplyDelay};
pub use error::ControllerClosedError;
