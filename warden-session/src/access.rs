// Record access shared by the storage-backed auth sessions.

use crate::error::{SessionError, SessionResult};
use crate::record::AuthRecord;
use crate::storage::SessionStorage;
use warden_log::{debug, error};

fn not_started(namespace: &str) -> SessionError {
    error!(
        "Auth session '{}' used before the session storage was started",
        namespace
    );
    SessionError::not_ready(namespace)
}

fn ensure_started(storage: &dyn SessionStorage, namespace: &str) -> SessionResult<()> {
    if storage.is_active() {
        return Ok(());
    }
    Err(not_started(namespace))
}

/// Logs a precondition failure raised by the storage itself.
fn reported<T>(result: SessionResult<T>, namespace: &str) -> SessionResult<T> {
    result.map_err(|err| match err {
        SessionError::StorageNotReady { .. } => not_started(namespace),
        other => other,
    })
}

pub(crate) fn load(storage: &dyn SessionStorage, namespace: &str) -> SessionResult<AuthRecord> {
    ensure_started(storage, namespace)?;
    let stored = reported(storage.get(namespace), namespace)?;
    Ok(AuthRecord::from_stored(stored.as_ref()))
}

pub(crate) fn store(
    storage: &dyn SessionStorage,
    namespace: &str,
    record: &AuthRecord,
) -> SessionResult<()> {
    ensure_started(storage, namespace)?;
    reported(storage.set(namespace, record.to_stored()), namespace)?;
    debug!(
        "Persisted auth record under '{}' (authenticated: {})",
        namespace,
        record.is_authenticated()
    );
    Ok(())
}

pub(crate) fn erase(storage: &dyn SessionStorage, namespace: &str) -> SessionResult<()> {
    ensure_started(storage, namespace)?;
    reported(storage.remove(namespace), namespace)?;
    debug!("Cleared auth record under '{}'", namespace);
    Ok(())
}
