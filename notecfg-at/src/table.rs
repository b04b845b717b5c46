//! AT command table
//!
//! A fixed list of command names with short help texts and the operations
//! each one supports. The external dispatcher looks names up here and
//! routes the matching operation into an
//! [`AtCommandSet`](crate::commands::AtCommandSet).

/// Command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandId {
    /// Notehub product UID (`+BUID`)
    ProductUid,
    /// SIM source and APN (`+BSIM`)
    SimSource,
    /// Connection mode (`+BMOD`)
    ConnectionMode,
    /// Motion trigger (`+BTRIG`)
    MotionTrigger,
    /// Remove the persisted settings (`+BR`)
    FactoryReset,
}

/// One row of the command table
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Command identifier
    pub id: CommandId,
    /// Command name as it appears after `AT`
    pub name: &'static str,
    /// Short help text
    pub help: &'static str,
    /// Supports `AT+NAME?`
    pub query: bool,
    /// Supports `AT+NAME=value`
    pub set: bool,
    /// Supports bare `AT+NAME`
    pub execute: bool,
}

/// All commands this module provides
pub const COMMANDS: [CommandSpec; 5] = [
    CommandSpec {
        id: CommandId::ProductUid,
        name: "+BUID",
        help: "Set/get the Notehub product UID",
        query: true,
        set: true,
        execute: false,
    },
    CommandSpec {
        id: CommandId::SimSource,
        name: "+BSIM",
        help: "Set/get SIM source and APN",
        query: true,
        set: true,
        execute: false,
    },
    CommandSpec {
        id: CommandId::ConnectionMode,
        name: "+BMOD",
        help: "Set/get the Notecard connection mode",
        query: true,
        set: true,
        execute: false,
    },
    CommandSpec {
        id: CommandId::MotionTrigger,
        name: "+BTRIG",
        help: "Set/get the motion send trigger",
        query: true,
        set: true,
        execute: false,
    },
    CommandSpec {
        id: CommandId::FactoryReset,
        name: "+BR",
        help: "Remove the saved settings",
        query: false,
        set: false,
        execute: true,
    },
];

/// Look a command up by name
///
/// Names are matched case-insensitively; AT dispatchers commonly upcase
/// the whole line before tokenizing.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name.eq_ignore_ascii_case(name))
}
