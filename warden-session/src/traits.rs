//! Auth session trait definition.

use crate::error::SessionResult;
use crate::record::{AuthRecord, SubjectId};
use http::Request;
use serde_json::Value;

/// Storage for the authentication record of the current session.
///
/// An auth layer uses this to remember who is logged in between
/// otherwise stateless requests. Backends differ in where the record
/// lives (a server-side session, a cookie, a cache), but all of them keep
/// exactly one [`AuthRecord`] per session and return what was persisted
/// without interpreting it.
///
/// # Request binding
///
/// Call [`for_request`](AuthSession::for_request) once per inbound request
/// and use the returned value for the rest of that request. Backends whose
/// storage is carried by the request pick it up there; backends with
/// process-wide storage return themselves.
///
/// # Errors
///
/// [`info`](AuthSession::info), [`persist`](AuthSession::persist) and
/// [`clear`](AuthSession::clear) fail with
/// [`SessionError::StorageNotReady`](crate::SessionError::StorageNotReady)
/// when the underlying session has not been started. Nothing else is an
/// error: an absent record reads as [`AuthRecord::empty`].
///
/// # Examples
///
/// ```
/// use warden_session::{AmbientSession, AuthSession, MemoryStorage, SessionResult};
/// use serde_json::json;
///
/// fn login(session: &impl AuthSession, user_id: i64) -> SessionResult<()> {
///     session.persist(Some(user_id.into()), Some(json!({ "roles": ["user"] })), None)
/// }
///
/// let storage = MemoryStorage::started();
/// let request = http::Request::new(());
/// let session = AmbientSession::new(storage).for_request(&request);
///
/// login(&session, 42)?;
/// assert!(session.info()?.is_authenticated());
/// # Ok::<(), warden_session::SessionError>(())
/// ```
pub trait AuthSession: Send + Sync {
    /// Bind to an inbound request.
    ///
    /// Never fails. The returned value may be a new instance; always use it
    /// instead of `self` afterwards.
    fn for_request<B>(&self, request: &Request<B>) -> Self
    where
        Self: Sized;

    /// Get the current auth record, or the empty record if none is stored.
    fn info(&self) -> SessionResult<AuthRecord>;

    /// Replace the stored auth record.
    ///
    /// All three fields are written; nothing from the previous record is
    /// kept.
    fn persist(
        &self,
        uid: Option<SubjectId>,
        context: Option<Value>,
        checksum: Option<String>,
    ) -> SessionResult<()>;

    /// Remove the auth record. Clearing an absent record is fine.
    fn clear(&self) -> SessionResult<()>;
}
