//! In-process session storage.

use crate::error::{SessionError, SessionResult};
use crate::storage::SessionStorage;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use warden_log::debug;

#[derive(Debug, Default)]
struct Inner {
    active: bool,
    data: HashMap<String, Value>,
}

/// Process-local [`SessionStorage`].
///
/// Clones share the same data, so one instance can be handed to every
/// component that needs the session. The store starts out inactive;
/// whoever owns the session lifecycle calls [`start`](Self::start).
/// Reads and writes check the active flag under the same lock they use for
/// the data, so they fail with [`SessionError::StorageNotReady`] whenever
/// the store is closed.
///
/// # Examples
///
/// ```
/// use warden_session::{MemoryStorage, SessionStorage};
/// use serde_json::json;
///
/// let storage = MemoryStorage::new();
/// assert!(!storage.is_active());
///
/// assert!(storage.set("auth", json!({ "uid": 1 })).is_err());
///
/// storage.start();
/// storage.set("auth", json!({ "uid": 1 })).unwrap();
/// assert_eq!(storage.get("auth").unwrap(), Some(json!({ "uid": 1 })));
///
/// storage.destroy();
/// assert!(storage.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    /// Create an inactive, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already started.
    pub fn started() -> Self {
        let storage = Self::new();
        storage.start();
        storage
    }

    /// Activate the store. Data kept by an earlier [`close`](Self::close)
    /// is available again.
    pub fn start(&self) {
        self.inner.write().active = true;
        debug!("Memory session storage started");
    }

    /// Deactivate the store, keeping its data.
    pub fn close(&self) {
        self.inner.write().active = false;
        debug!("Memory session storage closed");
    }

    /// Deactivate the store and drop all data.
    pub fn destroy(&self) {
        let mut inner = self.inner.write();
        inner.active = false;
        inner.data.clear();
        debug!("Memory session storage destroyed");
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.inner.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().data.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.read().data.contains_key(key)
    }
}

impl SessionStorage for MemoryStorage {
    fn is_active(&self) -> bool {
        self.inner.read().active
    }

    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        let inner = self.inner.read();
        if !inner.active {
            return Err(SessionError::not_ready(key));
        }
        Ok(inner.data.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> SessionResult<()> {
        let mut inner = self.inner.write();
        if !inner.active {
            return Err(SessionError::not_ready(key));
        }
        inner.data.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        let mut inner = self.inner.write();
        if !inner.active {
            return Err(SessionError::not_ready(key));
        }
        inner.data.remove(key);
        Ok(())
    }
}
