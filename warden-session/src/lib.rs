//! Authentication session storage for Warden.
//!
//! An auth layer needs to remember who is logged in between requests. This
//! crate defines the [`AuthSession`] contract for that, the typed record it
//! stores ([`AuthRecord`]) and backends built on a key-value
//! [`SessionStorage`].
//!
//! The record holds three values supplied by the caller:
//!
//! - `uid` - the authenticated subject ([`SubjectId`], integer or string)
//! - `context` - arbitrary JSON the auth layer wants to keep
//! - `checksum` - a tamper-detection value, stored and returned verbatim
//!
//! Computing and checking the checksum is the caller's business.
//!
//! # Backends
//!
//! - [`AmbientSession`] - record kept in a storage shared by the process
//! - [`RequestSession`] - record kept in the storage attached to each
//!   request by session middleware
//!
//! [`MemoryStorage`] is an in-process [`SessionStorage`] for tests and
//! single-process deployments.
//!
//! # Example
//!
//! ```
//! use warden_session::prelude::*;
//! use serde_json::json;
//!
//! let storage = MemoryStorage::new();
//! let session = AmbientSession::new(storage.clone());
//!
//! // The session has to be started by the surrounding infrastructure first
//! assert!(matches!(
//!     session.info(),
//!     Err(SessionError::StorageNotReady { .. })
//! ));
//!
//! storage.start();
//!
//! let request = http::Request::new(());
//! let session = session.for_request(&request);
//!
//! session.persist(Some(42.into()), Some(json!({ "role": "admin" })), Some("abc123".into()))?;
//! assert_eq!(
//!     session.info()?,
//!     AuthRecord::new(Some(42.into()), Some(json!({ "role": "admin" })), Some("abc123".into()))
//! );
//!
//! session.clear()?;
//! assert_eq!(session.info()?, AuthRecord::empty());
//! # Ok::<(), SessionError>(())
//! ```
//!
//! # Multiple auth contexts
//!
//! Each session stores its record under one namespace key (`"auth"` by
//! default). Sessions with different namespaces can share a storage
//! without seeing each other's records:
//!
//! ```
//! use warden_session::prelude::*;
//!
//! let storage = MemoryStorage::started();
//! let user = AmbientSession::with_namespace(storage.clone(), "auth:user");
//! let admin = AmbientSession::with_namespace(storage.clone(), "auth:admin");
//!
//! user.persist(Some("alice".into()), None, None)?;
//! assert!(admin.info()?.is_empty());
//! # Ok::<(), SessionError>(())
//! ```

mod access;
pub mod ambient;
pub mod config;
pub mod error;
pub mod memory;
pub mod record;
pub mod request;
pub mod storage;
pub mod traits;

pub use ambient::AmbientSession;
pub use config::{AuthSessionConfig, DEFAULT_NAMESPACE, NAMESPACE_ENV};
pub use error::{SessionError, SessionResult};
pub use memory::MemoryStorage;
pub use record::{AuthRecord, SubjectId};
pub use request::{RequestSession, SessionHandle};
pub use storage::SessionStorage;
pub use traits::AuthSession;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ambient::AmbientSession;
    pub use crate::config::AuthSessionConfig;
    pub use crate::error::{SessionError, SessionResult};
    pub use crate::memory::MemoryStorage;
    pub use crate::record::{AuthRecord, SubjectId};
    pub use crate::request::{RequestSession, SessionHandle};
    pub use crate::storage::SessionStorage;
    pub use crate::traits::AuthSession;
}
