//! Session storage contract.
//!
//! A [`SessionStorage`] is the key-value store an auth session reads and
//! writes through, such as a server-side session loaded for the current
//! request. Its lifecycle (starting, saving, expiring) belongs to the
//! surrounding infrastructure; the auth session never starts or closes it.

use crate::error::SessionResult;
use serde_json::Value;
use std::sync::Arc;

/// Key-value storage the auth session is kept in.
///
/// Implementations decide how values are serialized and how long they live.
/// Reads and writes fail with
/// [`SessionError::StorageNotReady`](crate::SessionError::StorageNotReady)
/// when the store is not active at the moment they run. The activity check
/// and the access must be one step: a store closed between the two never
/// reports a write it dropped as successful.
pub trait SessionStorage: Send + Sync {
    /// Whether the store has been started and may be used.
    fn is_active(&self) -> bool;

    /// Get the value stored under `key`.
    fn get(&self, key: &str) -> SessionResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Value) -> SessionResult<()>;

    /// Remove `key`. Removing a missing key does nothing.
    fn remove(&self, key: &str) -> SessionResult<()>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> SessionResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        (**self).remove(key)
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for &T {
    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> SessionResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        (**self).remove(key)
    }
}
