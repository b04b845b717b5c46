//! Settings record and flash persistence for the Notecard configuration
//! module
//!
//! This crate contains the board-agnostic half of the configuration
//! system:
//!
//! - [`settings::NoteSettings`] - the in-memory settings record
//! - [`layout`] - the fixed binary layout the record is persisted in,
//!   guarded by a validity marker and a version byte
//! - [`store::SettingsStore`] - load/save/reset against a
//!   [`notecfg_hal::SettingsMedium`]
//!
//! The AT command handlers that mutate the record live in `notecfg-at`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the log macros are visible to the other modules.
mod fmt;

pub mod layout;
pub mod settings;
pub mod store;

pub use settings::NoteSettings;
pub use store::{LoadPolicy, SettingsStore};
