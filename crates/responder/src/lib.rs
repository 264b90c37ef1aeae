//! Canned response selection for the ocean data assistant.
//!
//! This crate establishes the seam between the conversation controller
//! and whatever produces assistant replies. The only shipped
//! implementation is [`KeywordResponder`], a deterministic selector
//! over an ordered table of keyword rules.
//!
//! Types in this crate don't schedule or mutate anything; a [`Reply`]
//! describes what the caller should say and do, and performing the
//! side effect (if any) is entirely the caller's job.

#![deny(missing_docs)]

mod keyword;
mod reply;

pub use keyword::*;
pub use reply::*;
