//! AT command handlers
//!
//! [`AtCommandSet`] owns the settings store and the attention line and
//! implements the typed handler behind every table row. All setters share
//! one contract: validate, normalize, mutate the record, and persist only
//! when at least one field actually changed, so an idempotent re-set
//! never wears the flash.

use core::fmt::Write;

use heapless::String;
use notecfg_core::settings::{MAX_APN_LEN, MAX_UID_LEN};
use notecfg_core::SettingsStore;
use notecfg_hal::{AttentionLine, SettingsMedium};

use crate::reply::ReplyBuffer;
use crate::status::AtStatus;
use crate::table::CommandId;

/// Minimum product UID length
///
/// The shortest well-formed Notehub UID (`com.x.y:z` style) a deployment
/// uses; anything shorter is a typo.
pub const MIN_UID_LEN: usize = 25;

/// The set of AT command handlers
///
/// Constructed once at startup with the store and the attention line and
/// handed to the dispatcher; there is no global state.
pub struct AtCommandSet<M: SettingsMedium, A: AttentionLine> {
    store: SettingsStore<M>,
    attn: A,
}

impl<M: SettingsMedium, A: AttentionLine> AtCommandSet<M, A> {
    /// Create the command set
    pub fn new(store: SettingsStore<M>, attn: A) -> Self {
        Self { store, attn }
    }

    /// Access the settings store
    pub fn store(&self) -> &SettingsStore<M> {
        &self.store
    }

    /// Mutable access to the settings store
    ///
    /// The dispatcher uses this for the boot-time [`load`] call before any
    /// command arrives.
    ///
    /// [`load`]: SettingsStore::load
    pub fn store_mut(&mut self) -> &mut SettingsStore<M> {
        &mut self.store
    }

    /// Handle `AT+NAME?`
    ///
    /// Writes the answer into `reply`, replacing any previous contents.
    pub fn query(&mut self, id: CommandId, reply: &mut ReplyBuffer) -> AtStatus {
        reply.clear();
        match id {
            CommandId::ProductUid => self.query_product_uid(reply),
            CommandId::SimSource => self.query_sim_source(reply),
            CommandId::ConnectionMode => self.query_connection_mode(reply),
            CommandId::MotionTrigger => self.query_motion_trigger(reply),
            CommandId::FactoryReset => {
                debug!("command has no query form");
                AtStatus::ParameterFailure
            }
        }
    }

    /// Handle `AT+NAME=value`
    ///
    /// `value` is the raw text after the `=`.
    pub fn set(&mut self, id: CommandId, value: &str) -> AtStatus {
        match id {
            CommandId::ProductUid => self.set_product_uid(value),
            CommandId::SimSource => self.set_sim_source(value),
            CommandId::ConnectionMode => self.set_connection_mode(value),
            CommandId::MotionTrigger => self.set_motion_trigger(value),
            CommandId::FactoryReset => {
                debug!("command has no set form");
                AtStatus::ParameterFailure
            }
        }
    }

    /// Handle bare `AT+NAME`
    pub fn execute(&mut self, id: CommandId) -> AtStatus {
        match id {
            CommandId::FactoryReset => self.factory_reset(),
            _ => {
                debug!("command has no execute form");
                AtStatus::ParameterFailure
            }
        }
    }

    fn set_product_uid(&mut self, value: &str) -> AtStatus {
        if value.len() < MIN_UID_LEN {
            warn!("product UID too short: {} chars", value.len());
            return AtStatus::ParameterCount;
        }
        let Some(uid) = lowercased::<MAX_UID_LEN>(value) else {
            warn!("product UID too long: {} chars", value.len());
            return AtStatus::ParameterCount;
        };

        info!("new product UID {}", uid.as_str());
        if uid == self.store.settings().product_uid {
            return AtStatus::Success;
        }
        self.store.settings_mut().product_uid = uid;
        self.persist()
    }

    fn query_product_uid(&mut self, reply: &mut ReplyBuffer) -> AtStatus {
        let _ = reply.push_str(self.store.settings().product_uid.as_str());
        AtStatus::Success
    }

    /// SIM source parameter format: `0` (eSIM) or `1:<apn>` (external SIM)
    fn set_sim_source(&mut self, value: &str) -> AtStatus {
        let (flag, apn_raw) = match value.split_once(':') {
            Some((flag, rest)) => (flag, Some(rest)),
            None => (value, None),
        };

        let use_ext_sim = match flag {
            "0" => false,
            "1" => true,
            _ => {
                warn!("invalid SIM source flag {}", flag);
                return AtStatus::ParameterFailure;
            }
        };

        let mut changed = false;
        if use_ext_sim {
            let apn_raw = match apn_raw {
                Some(apn) if !apn.is_empty() => apn,
                _ => {
                    warn!("missing external SIM APN");
                    return AtStatus::ParameterCount;
                }
            };
            let Some(apn) = lowercased::<MAX_APN_LEN>(apn_raw) else {
                warn!("external SIM APN too long: {} chars", apn_raw.len());
                return AtStatus::ParameterCount;
            };

            info!("enable external SIM with APN {}", apn.as_str());
            if apn != self.store.settings().ext_sim_apn {
                self.store.settings_mut().ext_sim_apn = apn;
                changed = true;
            }
        } else {
            info!("enable eSIM");
        }

        if use_ext_sim != self.store.settings().use_ext_sim {
            self.store.settings_mut().use_ext_sim = use_ext_sim;
            changed = true;
        }

        if changed {
            self.persist()
        } else {
            AtStatus::Success
        }
    }

    fn query_sim_source(&mut self, reply: &mut ReplyBuffer) -> AtStatus {
        let settings = self.store.settings();
        if settings.use_ext_sim {
            let _ = write!(reply, "1:{}", settings.ext_sim_apn.as_str());
        } else {
            let _ = reply.push('0');
        }
        AtStatus::Success
    }

    fn set_connection_mode(&mut self, value: &str) -> AtStatus {
        let continuous = match value {
            "0" => false,
            "1" => true,
            _ => {
                warn!("invalid connection mode flag {}", value);
                return AtStatus::ParameterFailure;
            }
        };

        // The attention line follows every accepted set, changed or not
        if continuous {
            info!("set continuous connection mode");
            self.attn.enable();
        } else {
            info!("set periodic connection mode");
            self.attn.disable();
        }

        if continuous == self.store.settings().conn_continuous {
            return AtStatus::Success;
        }
        self.store.settings_mut().conn_continuous = continuous;
        self.persist()
    }

    fn query_connection_mode(&mut self, reply: &mut ReplyBuffer) -> AtStatus {
        let _ = reply.push(if self.store.settings().conn_continuous {
            '1'
        } else {
            '0'
        });
        AtStatus::Success
    }

    fn set_motion_trigger(&mut self, value: &str) -> AtStatus {
        let enabled = match value {
            "0" => false,
            "1" => true,
            _ => {
                warn!("invalid motion trigger flag {}", value);
                return AtStatus::ParameterFailure;
            }
        };

        if enabled {
            info!("enable motion trigger");
            self.attn.enable();
        } else {
            info!("disable motion trigger");
            self.attn.disable();
        }

        if enabled == self.store.settings().motion_trigger {
            return AtStatus::Success;
        }
        self.store.settings_mut().motion_trigger = enabled;
        self.persist()
    }

    fn query_motion_trigger(&mut self, reply: &mut ReplyBuffer) -> AtStatus {
        let _ = reply.push(if self.store.settings().motion_trigger {
            '1'
        } else {
            '0'
        });
        AtStatus::Success
    }

    fn factory_reset(&mut self) -> AtStatus {
        match self.store.reset() {
            Ok(()) => AtStatus::Success,
            Err(e) => {
                error!("settings reset failed: {:?}", e);
                AtStatus::StorageFailure
            }
        }
    }

    fn persist(&mut self) -> AtStatus {
        match self.store.save() {
            Ok(()) => AtStatus::Success,
            Err(e) => {
                error!("settings save failed: {:?}", e);
                AtStatus::StorageFailure
            }
        }
    }
}

/// ASCII-lowercase a parameter into a bounded string
///
/// Returns `None` when the input does not fit.
fn lowercased<const N: usize>(value: &str) -> Option<String<N>> {
    if value.len() > N {
        return None;
    }
    let mut out = String::new();
    for c in value.chars() {
        // Cannot overflow: ASCII folding keeps the byte length
        let _ = out.push(c.to_ascii_lowercase());
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notecfg_core::store::SETTINGS_FILE;
    use notecfg_hal::{RamMedium, StorageError};

    /// Medium wrapper that counts writes of the primary settings file
    struct CountingMedium {
        inner: RamMedium,
        saves: usize,
    }

    impl CountingMedium {
        fn new() -> Self {
            Self {
                inner: RamMedium::new(),
                saves: 0,
            }
        }
    }

    impl SettingsMedium for CountingMedium {
        fn exists(&mut self, name: &str) -> bool {
            self.inner.exists(name)
        }

        fn read(&mut self, name: &str, buffer: &mut [u8]) -> Result<usize, StorageError> {
            self.inner.read(name, buffer)
        }

        fn write(&mut self, name: &str, data: &[u8]) -> Result<(), StorageError> {
            if name == SETTINGS_FILE {
                self.saves += 1;
            }
            self.inner.write(name, data)
        }

        fn remove(&mut self, name: &str) -> Result<(), StorageError> {
            self.inner.remove(name)
        }
    }

    /// Attention line stub recording the calls it receives
    #[derive(Default)]
    struct RecordingAttn {
        enables: usize,
        disables: usize,
    }

    impl AttentionLine for &mut RecordingAttn {
        fn enable(&mut self) {
            self.enables += 1;
        }

        fn disable(&mut self) {
            self.disables += 1;
        }
    }

    fn command_set(
        attn: &mut RecordingAttn,
    ) -> AtCommandSet<CountingMedium, &mut RecordingAttn> {
        AtCommandSet::new(SettingsStore::new(CountingMedium::new()), attn)
    }

    fn saves<A: AttentionLine>(set: &AtCommandSet<CountingMedium, A>) -> usize {
        set.store().medium().saves
    }

    #[test]
    fn test_product_uid_is_lowercased_and_round_trips() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        let status = set.set(CommandId::ProductUid, "COM.EXAMPLE.PROJECT:MYDEV");
        assert_eq!(status, AtStatus::Success);

        let mut reply = ReplyBuffer::new();
        assert_eq!(set.query(CommandId::ProductUid, &mut reply), AtStatus::Success);
        assert_eq!(reply.as_str(), "com.example.project:mydev");
    }

    #[test]
    fn test_short_product_uid_rejected_without_mutation() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        let status = set.set(CommandId::ProductUid, "com.example:short");
        assert_eq!(status, AtStatus::ParameterCount);
        assert!(set.store().settings().product_uid.is_empty());
        assert_eq!(saves(&set), 0);
    }

    #[test]
    fn test_repeated_set_saves_once() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        assert!(set
            .set(CommandId::ProductUid, "com.example.project:mydev")
            .is_success());
        assert_eq!(saves(&set), 1);

        // Same value again, in different case: no second save
        assert!(set
            .set(CommandId::ProductUid, "COM.EXAMPLE.PROJECT:MYDEV")
            .is_success());
        assert_eq!(saves(&set), 1);
    }

    #[test]
    fn test_sim_source_round_trips() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);
        let mut reply = ReplyBuffer::new();

        assert!(set.set(CommandId::SimSource, "1:APN1").is_success());
        set.query(CommandId::SimSource, &mut reply);
        assert_eq!(reply.as_str(), "1:apn1");

        assert!(set.set(CommandId::SimSource, "0").is_success());
        set.query(CommandId::SimSource, &mut reply);
        assert_eq!(reply.as_str(), "0");
    }

    #[test]
    fn test_sim_source_missing_apn_rejected() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        assert_eq!(set.set(CommandId::SimSource, "1"), AtStatus::ParameterCount);
        assert_eq!(set.set(CommandId::SimSource, "1:"), AtStatus::ParameterCount);
        assert!(!set.store().settings().use_ext_sim);
        assert_eq!(saves(&set), 0);
    }

    #[test]
    fn test_sim_source_invalid_flag_rejected() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        assert_eq!(
            set.set(CommandId::SimSource, "2:apn"),
            AtStatus::ParameterFailure
        );
        assert_eq!(set.set(CommandId::SimSource, ""), AtStatus::ParameterFailure);
    }

    #[test]
    fn test_sim_source_apn_change_alone_saves() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        assert!(set.set(CommandId::SimSource, "1:apn1").is_success());
        assert_eq!(saves(&set), 1);

        // Same flag, new APN: the APN comparison must see the stored APN
        assert!(set.set(CommandId::SimSource, "1:apn2").is_success());
        assert_eq!(saves(&set), 2);

        // Fully idempotent re-set
        assert!(set.set(CommandId::SimSource, "1:apn2").is_success());
        assert_eq!(saves(&set), 2);
    }

    #[test]
    fn test_connection_mode_toggles_attention_line() {
        let mut attn = RecordingAttn::default();
        {
            let mut set = command_set(&mut attn);

            assert!(set.set(CommandId::ConnectionMode, "1").is_success());
            assert!(set.store().settings().conn_continuous);
            assert_eq!(saves(&set), 1);

            // Unchanged value: side effect fires again, no save
            assert!(set.set(CommandId::ConnectionMode, "1").is_success());
            assert_eq!(saves(&set), 1);

            assert!(set.set(CommandId::ConnectionMode, "0").is_success());
            assert_eq!(saves(&set), 2);
        }
        assert_eq!(attn.enables, 2);
        assert_eq!(attn.disables, 1);
    }

    #[test]
    fn test_connection_mode_invalid_flag() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        assert_eq!(
            set.set(CommandId::ConnectionMode, "2"),
            AtStatus::ParameterFailure
        );
        assert_eq!(
            set.set(CommandId::ConnectionMode, "01"),
            AtStatus::ParameterFailure
        );
    }

    #[test]
    fn test_motion_trigger_set_and_query() {
        let mut attn = RecordingAttn::default();
        {
            let mut set = command_set(&mut attn);
            let mut reply = ReplyBuffer::new();

            // Default is enabled
            set.query(CommandId::MotionTrigger, &mut reply);
            assert_eq!(reply.as_str(), "1");

            assert!(set.set(CommandId::MotionTrigger, "0").is_success());
            set.query(CommandId::MotionTrigger, &mut reply);
            assert_eq!(reply.as_str(), "0");
        }
        assert_eq!(attn.disables, 1);
    }

    #[test]
    fn test_factory_reset_removes_file() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);

        assert!(set.set(CommandId::ProductUid, "com.example.project:mydev").is_success());
        assert_eq!(set.execute(CommandId::FactoryReset), AtStatus::Success);

        assert!(!set.store_mut().medium_mut().exists(SETTINGS_FILE));
    }

    #[test]
    fn test_unsupported_operations() {
        let mut attn = RecordingAttn::default();
        let mut set = command_set(&mut attn);
        let mut reply = ReplyBuffer::new();

        assert_eq!(
            set.query(CommandId::FactoryReset, &mut reply),
            AtStatus::ParameterFailure
        );
        assert_eq!(
            set.set(CommandId::FactoryReset, "1"),
            AtStatus::ParameterFailure
        );
        assert_eq!(
            set.execute(CommandId::ProductUid),
            AtStatus::ParameterFailure
        );
    }
}
