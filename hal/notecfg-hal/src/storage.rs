//! Settings storage abstractions
//!
//! Provides a trait for the small named-file interface the settings store
//! needs from the device flash filesystem. Implementations wrap whatever
//! filesystem the board provides; wear leveling and sector management stay
//! on their side of the trait.

/// Errors from storage medium operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No file with the requested name
    NotFound,
    /// Caller's buffer is too small for the stored data
    BufferTooSmall,
    /// Medium cannot hold more data
    Full,
    /// Underlying filesystem or flash failure
    Io,
}

/// Named-file storage medium
///
/// The settings store treats the medium as a flat namespace of small
/// files, each written wholesale. Every operation is synchronous and runs
/// to completion; there is no cooperative suspension in the command path.
pub trait SettingsMedium {
    /// Check whether a file with this name exists
    fn exists(&mut self, name: &str) -> bool;

    /// Read a file's contents into the provided buffer
    ///
    /// Returns the number of bytes read. Fails with
    /// [`StorageError::BufferTooSmall`] if the file does not fit.
    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Create or replace a file with the given contents
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Remove a file
    fn remove(&mut self, name: &str) -> Result<(), StorageError>;
}
