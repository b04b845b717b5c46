//! In-memory storage medium
//!
//! Implements [`SettingsMedium`] over a heapless map. Used by host tests
//! and by the simulator build, where no flash filesystem exists.

use heapless::{FnvIndexMap, String, Vec};

use crate::storage::{SettingsMedium, StorageError};

/// Maximum file name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum size of a single file
pub const MAX_FILE_LEN: usize = 1024;

/// Maximum number of files (must be a power of two for FnvIndexMap)
pub const MAX_FILES: usize = 4;

/// RAM-backed storage medium
#[derive(Debug, Default)]
pub struct RamMedium {
    files: FnvIndexMap<String<MAX_NAME_LEN>, Vec<u8, MAX_FILE_LEN>, MAX_FILES>,
}

impl RamMedium {
    /// Create an empty medium
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files currently stored
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn key(name: &str) -> Result<String<MAX_NAME_LEN>, StorageError> {
        String::try_from(name).map_err(|_| StorageError::Full)
    }
}

impl SettingsMedium for RamMedium {
    fn exists(&mut self, name: &str) -> bool {
        match Self::key(name) {
            Ok(key) => self.files.contains_key(&key),
            Err(_) => false,
        }
    }

    fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
        let key = Self::key(name)?;
        let data = self.files.get(&key).ok_or(StorageError::NotFound)?;
        if buffer.len() < data.len() {
            return Err(StorageError::BufferTooSmall);
        }
        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError> {
        let key = Self::key(name)?;
        let mut contents = Vec::new();
        contents
            .extend_from_slice(data)
            .map_err(|_| StorageError::Full)?;
        match self.files.insert(key, contents) {
            Ok(_) => Ok(()),
            Err(_) => Err(StorageError::Full),
        }
    }

    fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        let key = Self::key(name)?;
        self.files.remove(&key).ok_or(StorageError::NotFound)?;
        Ok(())
    }
}
