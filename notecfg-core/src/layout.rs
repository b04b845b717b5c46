//! Binary layout of the persisted settings record
//!
//! The record is stored as one fixed-size blob:
//!
//! ```text
//! ┌────────────┬─────────┬───────┬─────────┬───────────┬─────────┬───────────┐
//! │ VALID_MARK │ VERSION │ FLAGS │ UID LEN │ UID BYTES │ APN LEN │ APN BYTES │
//! │ 2B (LE)    │ 1B      │ 1B    │ 1B      │ 255B      │ 1B      │ 255B      │
//! └────────────┴─────────┴───────┴─────────┴───────────┴─────────┴───────────┘
//! ```
//!
//! The marker distinguishes a properly written record from uninitialized
//! flash; the version byte is separate so a future layout change is
//! detected instead of silently misread. String fields are zero-padded to
//! their maximum length so the total size is stable across save/load.

use heapless::String;

use crate::settings::{NoteSettings, MAX_APN_LEN, MAX_UID_LEN};

/// Validity marker for a properly written record
pub const VALID_MARK: u16 = 0xAA55;

/// Current layout version
pub const LAYOUT_VERSION: u8 = 1;

/// Total size of the persisted blob
pub const SETTINGS_BLOB_LEN: usize = 2 + 1 + 1 + (1 + MAX_UID_LEN) + (1 + MAX_APN_LEN);

// Flag byte bits
const FLAG_EXT_SIM: u8 = 1 << 0;
const FLAG_CONTINUOUS: u8 = 1 << 1;
const FLAG_MOTION: u8 = 1 << 2;
const FLAG_ALL: u8 = FLAG_EXT_SIM | FLAG_CONTINUOUS | FLAG_MOTION;

// Field offsets
const OFFSET_MARK: usize = 0;
const OFFSET_VERSION: usize = 2;
const OFFSET_FLAGS: usize = 3;
const OFFSET_UID: usize = 4;
const OFFSET_APN: usize = OFFSET_UID + 1 + MAX_UID_LEN;

/// Errors from decoding a persisted blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Validity marker mismatch (uninitialized or foreign data)
    BadMarker,
    /// Marker is valid but the layout version is not ours
    BadVersion,
    /// Blob is shorter than the fixed record size
    Truncated,
    /// Structurally invalid contents (bad length byte, stray flag bits,
    /// non-UTF-8 string data)
    Corrupted,
}

/// Encode a settings record into its fixed-size blob
///
/// The validity marker and version are always written fresh; the caller
/// never has to maintain them.
pub fn encode(settings: &NoteSettings, out: &mut [u8; SETTINGS_BLOB_LEN]) {
    out.fill(0);
    out[OFFSET_MARK..OFFSET_MARK + 2].copy_from_slice(&VALID_MARK.to_le_bytes());
    out[OFFSET_VERSION] = LAYOUT_VERSION;

    let mut flags = 0u8;
    if settings.use_ext_sim {
        flags |= FLAG_EXT_SIM;
    }
    if settings.conn_continuous {
        flags |= FLAG_CONTINUOUS;
    }
    if settings.motion_trigger {
        flags |= FLAG_MOTION;
    }
    out[OFFSET_FLAGS] = flags;

    encode_field(&mut out[OFFSET_UID..], settings.product_uid.as_str());
    encode_field(&mut out[OFFSET_APN..], settings.ext_sim_apn.as_str());
}

/// Decode a persisted blob into a settings record
///
/// Never partially applies: either the whole blob is valid and a complete
/// record is returned, or an error describes the first problem found.
pub fn decode(blob: &[u8]) -> Result<NoteSettings, LayoutError> {
    if blob.len() < SETTINGS_BLOB_LEN {
        return Err(LayoutError::Truncated);
    }

    let mark = u16::from_le_bytes([blob[OFFSET_MARK], blob[OFFSET_MARK + 1]]);
    if mark != VALID_MARK {
        return Err(LayoutError::BadMarker);
    }
    if blob[OFFSET_VERSION] != LAYOUT_VERSION {
        return Err(LayoutError::BadVersion);
    }

    let flags = blob[OFFSET_FLAGS];
    if flags & !FLAG_ALL != 0 {
        return Err(LayoutError::Corrupted);
    }

    Ok(NoteSettings {
        product_uid: decode_field::<MAX_UID_LEN>(&blob[OFFSET_UID..])?,
        use_ext_sim: flags & FLAG_EXT_SIM != 0,
        ext_sim_apn: decode_field::<MAX_APN_LEN>(&blob[OFFSET_APN..])?,
        conn_continuous: flags & FLAG_CONTINUOUS != 0,
        motion_trigger: flags & FLAG_MOTION != 0,
    })
}

/// Write a length-prefixed, zero-padded string field
fn encode_field(out: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    out[0] = bytes.len() as u8;
    out[1..1 + bytes.len()].copy_from_slice(bytes);
}

/// Read a length-prefixed string field
fn decode_field<const N: usize>(field: &[u8]) -> Result<String<N>, LayoutError> {
    let len = field[0] as usize;
    if len > N {
        return Err(LayoutError::Corrupted);
    }
    let text = core::str::from_utf8(&field[1..1 + len]).map_err(|_| LayoutError::Corrupted)?;
    String::try_from(text).map_err(|_| LayoutError::Corrupted)
}
