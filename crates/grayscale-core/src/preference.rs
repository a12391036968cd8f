//! The visitor's "forced off" preference.
//!
//! One boolean under one key. The key and sentinel are a stored-state
//! contract with every browser that has ever toggled the effect, so they must
//! not change.

use crate::storage::KeyValueStore;

/// Storage key holding the preference.
pub const PREFERENCE_KEY: &str = "sgmUserOff";

/// Stored value meaning "forced off". Anything else means not forced off.
pub const FORCED_OFF: &str = "1";

/// Stored value written when the visitor turns the effect back on.
pub const NOT_FORCED_OFF: &str = "0";

/// Best-effort persistence of `userForcedOff`.
///
/// Neither operation can fail from the caller's point of view: read errors
/// read as `false`, write errors are dropped.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Whether the visitor has forced the effect off.
    pub fn read(&self) -> bool {
        match self.storage.get_item(PREFERENCE_KEY) {
            Ok(Some(value)) => value == FORCED_OFF,
            Ok(None) => false,
            Err(e) => {
                tracing::debug!(error = %e, "Preference read failed, treating as not set");
                false
            }
        }
    }

    /// Persist the preference. Failures are logged and ignored.
    pub fn write(&mut self, forced_off: bool) {
        let value = if forced_off { FORCED_OFF } else { NOT_FORCED_OFF };
        if let Err(e) = self.storage.set_item(PREFERENCE_KEY, value) {
            tracing::debug!(error = %e, forced_off, "Preference write failed, ignoring");
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    #[test]
    fn test_read_absent_key_is_false() {
        let store = PreferenceStore::new(MemoryStorage::new());
        assert!(!store.read());
    }

    #[test]
    fn test_read_sentinel_is_true() {
        let store = PreferenceStore::new(MemoryStorage::with_item(PREFERENCE_KEY, "1"));
        assert!(store.read());
    }

    #[test]
    fn test_read_other_values_are_false() {
        for value in ["0", "", "true", "on", "1 ", " 1", "11", "yes"] {
            let store = PreferenceStore::new(MemoryStorage::with_item(PREFERENCE_KEY, value));
            assert!(!store.read(), "value {value:?} must not read as forced off");
        }
    }

    #[test]
    fn test_read_failure_is_false() {
        let storage =
            MemoryStorage::with_item(PREFERENCE_KEY, "1").fail_reads(StorageError::Unavailable);
        let store = PreferenceStore::new(storage);
        assert!(!store.read());
    }

    #[test]
    fn test_write_round_trip() {
        let mut store = PreferenceStore::new(MemoryStorage::new());
        store.write(true);
        assert_eq!(store.storage().peek(PREFERENCE_KEY), Some("1"));
        assert!(store.read());

        store.write(false);
        assert_eq!(store.storage().peek(PREFERENCE_KEY), Some("0"));
        assert!(!store.read());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let mut store =
            PreferenceStore::new(MemoryStorage::new().fail_writes(StorageError::QuotaExceeded));
        store.write(true);
        assert!(!store.read());
    }

    #[test]
    fn test_ignores_other_keys() {
        let store = PreferenceStore::new(MemoryStorage::with_item("otherKey", "1"));
        assert!(!store.read());
    }
}
