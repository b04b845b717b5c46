//! Settings record definition
//!
//! A single record holds everything the tracker needs to configure its
//! Notecard: the Notehub product UID, the SIM source, the connection mode
//! and the motion trigger. The record is owned by whoever constructs the
//! store and is mutated only through the AT command handlers.

use heapless::String;

/// Maximum product UID length
pub const MAX_UID_LEN: usize = 255;

/// Maximum APN length
pub const MAX_APN_LEN: usize = 255;

/// In-memory settings record
///
/// String fields are always ASCII-lowercase; the command handlers fold
/// case before storing. The flash representation is defined in
/// [`crate::layout`], which prefixes a validity marker and a version byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteSettings {
    /// Notehub product UID (`com.<company>.<user>:<project>`)
    pub product_uid: String<MAX_UID_LEN>,
    /// Use the external SIM slot instead of the built-in eSIM
    pub use_ext_sim: bool,
    /// APN for the external SIM; meaningful only when `use_ext_sim`
    pub ext_sim_apn: String<MAX_APN_LEN>,
    /// Continuous connection instead of periodic sync
    pub conn_continuous: bool,
    /// Send data when the accelerometer reports motion
    pub motion_trigger: bool,
}

impl Default for NoteSettings {
    fn default() -> Self {
        let mut ext_sim_apn = String::new();
        // Single char always fits
        let _ = ext_sim_apn.push('-');
        Self {
            product_uid: String::new(),
            use_ext_sim: false,
            ext_sim_apn,
            conn_continuous: false,
            motion_trigger: true,
        }
    }
}
