//! The ocean data assistant, assembled: a ready-to-use chat session
//! over the canned keyword responder.
//!
//! The crate includes a terminal front-end for chatting in place. And
//! you can also use it as a library to embed the session into your own
//! host apps.

#![deny(missing_docs)]

mod session;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`ocean_assist_core`] crate.
pub mod core {
    pub use ocean_assist_core::*;
}

/// Conversation starters shown by the terminal front-end.
pub const SUGGESTED_QUERIES: &[&str] = &[
    "What are ARGO floats?",
    "Show me temperature data for the Pacific Ocean",
    "How do ocean currents affect climate?",
    "What's the deepest ARGO measurement?",
    "Explain salinity variations",
    "Show recent data from the Atlantic",
    "What causes ocean acidification?",
    "How accurate are ARGO measurements?",
    "Compare temperature trends by region",
    "What is the thermohaline circulation?",
];
