//! Settings persistence
//!
//! Loads and saves the settings record through a [`SettingsMedium`].
//!
//! A save never leaves the medium without a valid record: the blob is
//! first written to a scratch file, then the primary is replaced, then the
//! scratch is removed. A load that finds no usable primary file checks the
//! scratch file, so a power loss at any point of a save is recovered on
//! the next boot.

use notecfg_hal::{SettingsMedium, StorageError};

use crate::layout::{self, SETTINGS_BLOB_LEN};
use crate::settings::NoteSettings;

/// Name of the settings file
pub const SETTINGS_FILE: &str = "BLUES";

/// Name of the scratch file used during a save
pub const SCRATCH_FILE: &str = "BLUES~";

/// What to do with the in-memory record when no valid file is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadPolicy {
    /// Leave the record as it is; the caller decides what unconfigured
    /// means
    #[default]
    LeaveUnchanged,
    /// Reset the record to defaults and persist them
    FillDefaults,
}

/// Settings store
///
/// Owns the in-memory record and the storage medium. The record is
/// authoritative; the file is a snapshot taken on [`save`](Self::save).
#[derive(Debug)]
pub struct SettingsStore<M: SettingsMedium> {
    medium: M,
    policy: LoadPolicy,
    settings: NoteSettings,
}

impl<M: SettingsMedium> SettingsStore<M> {
    /// Create a store with default settings and the default load policy
    pub fn new(medium: M) -> Self {
        Self::with_policy(medium, LoadPolicy::default())
    }

    /// Create a store with an explicit load policy
    pub fn with_policy(medium: M, policy: LoadPolicy) -> Self {
        Self {
            medium,
            policy,
            settings: NoteSettings::default(),
        }
    }

    /// Current settings record
    pub fn settings(&self) -> &NoteSettings {
        &self.settings
    }

    /// Mutable access to the settings record
    ///
    /// Changes are in-memory only until [`save`](Self::save) is called.
    pub fn settings_mut(&mut self) -> &mut NoteSettings {
        &mut self.settings
    }

    /// Access the underlying medium
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Mutable access to the underlying medium
    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    /// Consume the store and return the underlying medium
    pub fn into_medium(self) -> M {
        self.medium
    }

    /// Load the settings record from the medium
    ///
    /// Returns `Ok(true)` when a valid record was adopted. A missing file
    /// and an invalid record both yield `Ok(false)` and apply the load
    /// policy; only real medium failures are errors.
    pub fn load(&mut self) -> Result<bool, StorageError> {
        if let Some(settings) = self.try_read(SETTINGS_FILE)? {
            self.settings = settings;
            self.log_summary();
            return Ok(true);
        }

        // A scratch file is the survivor of an interrupted save; adopt it
        // and reinstate it as the primary.
        if let Some(settings) = self.try_read(SCRATCH_FILE)? {
            info!("recovering settings from interrupted save");
            self.settings = settings;
            self.save()?;
            self.log_summary();
            return Ok(true);
        }

        warn!("no valid settings found");
        if self.policy == LoadPolicy::FillDefaults {
            info!("writing default settings");
            self.settings = NoteSettings::default();
            self.save()?;
        }
        Ok(false)
    }

    /// Persist the settings record
    pub fn save(&mut self) -> Result<(), StorageError> {
        let mut blob = [0u8; SETTINGS_BLOB_LEN];
        layout::encode(&self.settings, &mut blob);

        self.medium.write(SCRATCH_FILE, &blob)?;
        if self.medium.exists(SETTINGS_FILE) {
            self.medium.remove(SETTINGS_FILE)?;
        }
        self.medium.write(SETTINGS_FILE, &blob)?;
        self.medium.remove(SCRATCH_FILE)?;

        info!("settings saved");
        Ok(())
    }

    /// Remove the persisted record
    ///
    /// The in-memory record is not touched; the device falls back to an
    /// unconfigured state on the next boot.
    pub fn reset(&mut self) -> Result<(), StorageError> {
        for name in [SETTINGS_FILE, SCRATCH_FILE] {
            if self.medium.exists(name) {
                self.medium.remove(name)?;
            }
        }
        info!("settings file removed");
        Ok(())
    }

    /// Read and decode one file; `None` for missing or invalid data
    fn try_read(&mut self, name: &str) -> Result<Option<NoteSettings>, StorageError> {
        if !self.medium.exists(name) {
            return Ok(None);
        }

        let mut blob = [0u8; SETTINGS_BLOB_LEN];
        let len = match self.medium.read(name, &mut blob) {
            Ok(len) => len,
            // The file may hold a blob from a larger, future layout
            Err(StorageError::BufferTooSmall) => {
                warn!("settings file {} has unexpected size", name);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if len != SETTINGS_BLOB_LEN {
            warn!("settings file {} has unexpected size {}", name, len);
            return Ok(None);
        }

        match layout::decode(&blob) {
            Ok(settings) => Ok(Some(settings)),
            Err(e) => {
                warn!("settings file {} is invalid: {:?}", name, e);
                Ok(None)
            }
        }
    }

    fn log_summary(&self) {
        info!(
            "valid settings found, product UID = {}",
            self.settings.product_uid.as_str()
        );
        if self.settings.use_ext_sim {
            info!(
                "using external SIM with APN = {}",
                self.settings.ext_sim_apn.as_str()
            );
        } else {
            info!("using eSIM");
        }
    }
}
