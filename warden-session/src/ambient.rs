//! Auth session kept in a shared session storage.

use crate::access;
use crate::config::AuthSessionConfig;
use crate::error::SessionResult;
use crate::record::{AuthRecord, SubjectId};
use crate::storage::SessionStorage;
use crate::traits::AuthSession;
use http::Request;
use serde_json::Value;

/// Auth session stored in a [`SessionStorage`] shared by the whole process.
///
/// The storage is injected once and is not derived from the request, so
/// [`for_request`](AuthSession::for_request) just hands back a copy of the
/// session. Starting the storage is left to whatever manages the session
/// lifecycle; until then every operation fails with
/// [`SessionError::StorageNotReady`](crate::SessionError::StorageNotReady).
///
/// # Examples
///
/// ```
/// use warden_session::{AmbientSession, AuthSession, MemoryStorage};
/// use serde_json::json;
///
/// let storage = MemoryStorage::new();
/// let session = AmbientSession::new(storage.clone());
///
/// // Storage not started yet
/// assert!(session.info().unwrap_err().is_storage_not_ready());
///
/// storage.start();
/// session.persist(Some(42.into()), Some(json!({ "role": "admin" })), Some("abc123".into()))?;
///
/// let info = session.info()?;
/// assert_eq!(info.uid, Some(42.into()));
/// assert_eq!(info.checksum.as_deref(), Some("abc123"));
///
/// session.clear()?;
/// assert!(session.info()?.is_empty());
/// # Ok::<(), warden_session::SessionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AmbientSession<S> {
    storage: S,
    config: AuthSessionConfig,
}

impl<S: SessionStorage> AmbientSession<S> {
    /// Create a session using the default namespace.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, AuthSessionConfig::default())
    }

    /// Create a session with the given configuration.
    pub fn with_config(storage: S, config: AuthSessionConfig) -> Self {
        Self { storage, config }
    }

    /// Create a session storing its record under `namespace`.
    pub fn with_namespace(storage: S, namespace: &str) -> Self {
        Self::with_config(storage, AuthSessionConfig::default().with_namespace(namespace))
    }

    /// Key the auth record is stored under.
    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn config(&self) -> &AuthSessionConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: SessionStorage + Clone> AuthSession for AmbientSession<S> {
    fn for_request<B>(&self, _request: &Request<B>) -> Self {
        self.clone()
    }

    fn info(&self) -> SessionResult<AuthRecord> {
        access::load(&self.storage, self.namespace())
    }

    fn persist(
        &self,
        uid: Option<SubjectId>,
        context: Option<Value>,
        checksum: Option<String>,
    ) -> SessionResult<()> {
        let record = AuthRecord::new(uid, context, checksum);
        access::store(&self.storage, self.namespace(), &record)
    }

    fn clear(&self) -> SessionResult<()> {
        access::erase(&self.storage, self.namespace())
    }
}
