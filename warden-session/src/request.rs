//! Auth session carried by the request.
//!
//! Session middleware loads the session for a request and attaches a
//! [`SessionHandle`] to the request extensions. [`RequestSession`] picks the
//! handle up in [`for_request`](AuthSession::for_request), so the same
//! `RequestSession` value can serve many requests, each with its own
//! storage.

use crate::access;
use crate::config::AuthSessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::record::{AuthRecord, SubjectId};
use crate::storage::SessionStorage;
use crate::traits::AuthSession;
use http::Request;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use warden_log::{debug, error};

/// Reference to the session storage of a single request.
#[derive(Clone)]
pub struct SessionHandle {
    storage: Arc<dyn SessionStorage>,
}

impl SessionHandle {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    /// Wrap storage that is already shared.
    pub fn from_arc(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Attach this handle to a request, replacing any handle already there.
    pub fn attach<B>(self, request: &mut Request<B>) {
        request.extensions_mut().insert(self);
    }

    /// Handle attached to `request`, if any.
    pub fn from_request<B>(request: &Request<B>) -> Option<Self> {
        request.extensions().get::<Self>().cloned()
    }

    pub fn storage(&self) -> &dyn SessionStorage {
        self.storage.as_ref()
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("active", &self.storage.is_active())
            .finish()
    }
}

/// Auth session whose storage travels with the request.
///
/// A session that has not been bound to a request, or was bound to one
/// without a [`SessionHandle`], has no storage and fails every operation
/// with [`SessionError::StorageNotReady`].
///
/// # Examples
///
/// ```
/// use warden_session::{AuthSession, MemoryStorage, RequestSession, SessionHandle};
///
/// let storage = MemoryStorage::started();
/// let mut request = http::Request::new(());
/// SessionHandle::new(storage.clone()).attach(&mut request);
///
/// let sessions = RequestSession::new();
/// let session = sessions.for_request(&request);
/// session.persist(Some("alice".into()), None, None)?;
///
/// assert!(storage.contains_key("auth"));
/// # Ok::<(), warden_session::SessionError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestSession {
    handle: Option<SessionHandle>,
    config: AuthSessionConfig,
}

impl RequestSession {
    /// Create an unbound session using the default namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbound session with the given configuration.
    pub fn with_config(config: AuthSessionConfig) -> Self {
        Self {
            handle: None,
            config,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    /// Whether a session handle was found on the bound request.
    pub fn is_bound(&self) -> bool {
        self.handle.is_some()
    }

    fn storage(&self) -> SessionResult<&dyn SessionStorage> {
        match &self.handle {
            Some(handle) => Ok(handle.storage()),
            None => {
                error!(
                    "Auth session '{}' used without a session attached to the request",
                    self.namespace()
                );
                Err(SessionError::not_ready(self.namespace()))
            }
        }
    }
}

impl AuthSession for RequestSession {
    fn for_request<B>(&self, request: &Request<B>) -> Self {
        let handle = SessionHandle::from_request(request);
        if handle.is_none() {
            debug!("No session handle on request {}", request.uri());
        }
        Self {
            handle,
            config: self.config.clone(),
        }
    }

    fn info(&self) -> SessionResult<AuthRecord> {
        access::load(self.storage()?, self.namespace())
    }

    fn persist(
        &self,
        uid: Option<SubjectId>,
        context: Option<Value>,
        checksum: Option<String>,
    ) -> SessionResult<()> {
        let record = AuthRecord::new(uid, context, checksum);
        access::store(self.storage()?, self.namespace(), &record)
    }

    fn clear(&self) -> SessionResult<()> {
        access::erase(self.storage()?, self.namespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use serde_json::json;

    fn request_with(storage: &MemoryStorage) -> Request<()> {
        let mut request = Request::new(());
        SessionHandle::new(storage.clone()).attach(&mut request);
        request
    }

    #[test]
    fn test_unbound_session_is_not_ready() {
        let session = RequestSession::new();
        assert!(!session.is_bound());
        assert!(session.info().unwrap_err().is_storage_not_ready());
        assert!(session.persist(None, None, None).unwrap_err().is_storage_not_ready());
        assert!(session.clear().unwrap_err().is_storage_not_ready());
    }

    #[test]
    fn test_request_without_handle_stays_unbound() {
        let session = RequestSession::new().for_request(&Request::new(()));
        assert!(!session.is_bound());
        assert!(session.info().is_err());
    }

    #[test]
    fn test_binds_to_request_storage() {
        let storage = MemoryStorage::started();
        let session = RequestSession::new().for_request(&request_with(&storage));

        assert!(session.is_bound());
        session
            .persist(Some(9.into()), Some(json!({ "mfa": true })), Some("sum".into()))
            .unwrap();

        assert_eq!(
            storage.get("auth").unwrap(),
            Some(json!({ "uid": 9, "context": { "mfa": true }, "checksum": "sum" }))
        );
    }

    #[test]
    fn test_each_request_gets_its_own_storage() {
        let first = MemoryStorage::started();
        let second = MemoryStorage::started();
        let sessions = RequestSession::new();

        sessions
            .for_request(&request_with(&first))
            .persist(Some("alice".into()), None, None)
            .unwrap();

        let other = sessions.for_request(&request_with(&second));
        assert!(other.info().unwrap().is_empty());
        assert!(!sessions.is_bound());
    }

    #[test]
    fn test_inactive_request_storage_is_not_ready() {
        let storage = MemoryStorage::new();
        let session = RequestSession::new().for_request(&request_with(&storage));
        assert!(session.is_bound());
        assert!(session.info().unwrap_err().is_storage_not_ready());
    }

    #[test]
    fn test_rebinding_replaces_handle() {
        let first = MemoryStorage::started();
        let second = MemoryStorage::started();
        second.set("auth", json!({ "uid": "bob" })).unwrap();

        let session = RequestSession::new().for_request(&request_with(&first));
        let session = session.for_request(&request_with(&second));

        assert_eq!(session.info().unwrap().uid, Some(SubjectId::from("bob")));
    }

    #[test]
    fn test_custom_namespace() {
        let storage = MemoryStorage::started();
        let config = AuthSessionConfig::new("auth:tenant-7").unwrap();
        let session = RequestSession::with_config(config).for_request(&request_with(&storage));

        session.persist(Some(1.into()), None, None).unwrap();
        assert!(storage.contains_key("auth:tenant-7"));
        assert!(!storage.contains_key("auth"));
    }
}
