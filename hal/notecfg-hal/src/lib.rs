//! Notecfg Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interfaces the configuration
//! module needs from the host firmware:
//!
//! - [`storage::SettingsMedium`] - named-file storage on the device flash
//!   filesystem (exists/read/write/remove)
//! - [`attention::AttentionLine`] - the Notecard ATTN interrupt line
//!
//! The real implementations (LittleFS-backed storage, the ATTN GPIO) live
//! in the chip-specific firmware. [`ram::RamMedium`] is a self-contained
//! in-memory medium for host tests and simulation.

#![no_std]
#![deny(unsafe_code)]

pub mod attention;
pub mod ram;
pub mod storage;

pub use attention::AttentionLine;
pub use ram::RamMedium;
pub use storage::{SettingsMedium, StorageError};
