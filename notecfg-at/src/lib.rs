//! AT command surface for the Notecard configuration module
//!
//! The host firmware's AT dispatcher tokenizes `AT+NAME?`, `AT+NAME=value`
//! and bare `AT+NAME` lines, looks the name up in [`table::COMMANDS`] and
//! routes the call into an [`commands::AtCommandSet`]. Everything past
//! that point - validation, normalization, persistence, the attention
//! line side effects - lives here.

#![no_std]
#![deny(unsafe_code)]

// Must come first so the log macros are visible to the other modules.
mod fmt;

pub mod commands;
pub mod reply;
pub mod status;
pub mod table;

pub use commands::AtCommandSet;
pub use reply::{ReplyBuffer, REPLY_CAPACITY};
pub use status::AtStatus;
pub use table::{lookup, CommandId, CommandSpec, COMMANDS};
