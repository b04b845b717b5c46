//! AT handler status codes
//!
//! These are the only machine-readable results the external dispatcher
//! sees; everything else is mirrored to the diagnostic log.

/// Result of an AT command handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AtStatus {
    /// Command accepted
    Success,
    /// A parameter was present but not an accepted value
    ParameterFailure,
    /// Wrong number or length of parameters
    ParameterCount,
    /// The settings could not be persisted or removed
    StorageFailure,
}

impl AtStatus {
    /// Check if this status reports success
    pub fn is_success(self) -> bool {
        self == AtStatus::Success
    }
}
