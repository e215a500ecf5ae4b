// Warden - pluggable authentication session storage
//
// Re-exports the Warden crates: the auth session contract and its backends,
// and the logging layer they report through.

// Re-export the auth session API
pub use warden_session::*;

// Re-export member crates
pub use warden_log;
pub use warden_session;

// Prelude for common imports
pub mod prelude {
    pub use warden_session::prelude::*;
}
