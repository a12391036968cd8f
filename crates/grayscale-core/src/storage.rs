//! Per-browser key/value storage.
//!
//! [`KeyValueStore`] mirrors the shape of `window.localStorage`: synchronous
//! calls that either return immediately or fail. [`MemoryStorage`] is the
//! in-process implementation, with failure injection for tests and for hosts
//! that have no persistent storage at all.

use std::collections::HashMap;

/// Failure reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage access denied")]
    Denied,
}

/// Synchronous, fallible string storage keyed by name.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-memory storage with optional failure injection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    read_failure: Option<StorageError>,
    write_failure: Option<StorageError>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.items.insert(key.to_string(), value.to_string());
        storage
    }

    /// Make every subsequent read fail with `error`.
    pub fn fail_reads(mut self, error: StorageError) -> Self {
        self.read_failure = Some(error);
        self
    }

    /// Make every subsequent write fail with `error`.
    pub fn fail_writes(mut self, error: StorageError) -> Self {
        self.write_failure = Some(error);
        self
    }

    /// Raw stored value, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Drop every entry, as a visitor clearing site data would.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if let Some(err) = &self.read_failure {
            return Err(err.clone());
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(err) = &self.write_failure {
            return Err(err.clone());
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
