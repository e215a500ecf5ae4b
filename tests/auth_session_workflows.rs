//! Integration tests for common Warden workflows.
//!
//! These drive the auth session the way an authentication layer and its
//! session middleware would across several requests.

use serde_json::{Value, json};
use warden::DEFAULT_NAMESPACE;
use warden::prelude::*;

// =============================================================================
// Helpers
// =============================================================================

const SECRET: &str = "test-secret";

/// Stand-in for the auth layer's checksum. Opaque to the session store.
fn checksum(uid: &SubjectId, context: &Value) -> String {
    format!("{}|{}|{}", uid, context, SECRET)
}

fn request(path: &str) -> http::Request<()> {
    http::Request::builder().uri(path).body(()).unwrap()
}

/// What the auth layer does when restoring state: read and verify.
fn current_user(session: &impl AuthSession) -> SessionResult<Option<SubjectId>> {
    let info = session.info()?;
    let verified = match (&info.uid, &info.checksum) {
        (Some(uid), Some(sum)) => {
            let context = info.context.clone().unwrap_or(Value::Null);
            *sum == checksum(uid, &context)
        }
        _ => false,
    };
    Ok(if verified { info.uid } else { None })
}

fn login(session: &impl AuthSession, uid: SubjectId, context: Value) -> SessionResult<()> {
    let sum = checksum(&uid, &context);
    session.persist(Some(uid), Some(context), Some(sum))
}

// =============================================================================
// Ambient storage
// =============================================================================

#[test]
fn test_login_then_restore_on_next_request() {
    let storage = MemoryStorage::new();
    let sessions = AmbientSession::new(storage.clone());

    // Request 1: middleware starts the session, user logs in
    storage.start();
    let session = sessions.for_request(&request("/login"));
    login(&session, 42.into(), json!({ "role": "admin" })).unwrap();
    storage.close();

    // Request 2: state survives between requests
    storage.start();
    let session = sessions.for_request(&request("/dashboard"));
    assert_eq!(current_user(&session).unwrap(), Some(SubjectId::Int(42)));
    storage.close();

    // Request 3: logout
    storage.start();
    let session = sessions.for_request(&request("/logout"));
    session.clear().unwrap();
    assert_eq!(current_user(&session).unwrap(), None);
}

#[test]
fn test_tampered_record_is_detected_by_caller() {
    let storage = MemoryStorage::started();
    let session = AmbientSession::new(storage.clone());
    login(&session, "alice".into(), json!({ "role": "user" })).unwrap();

    // Someone with access to the storage escalates the role
    let mut stored = storage.get(DEFAULT_NAMESPACE).unwrap().unwrap();
    stored["context"] = json!({ "role": "admin" });
    storage.set(DEFAULT_NAMESPACE, stored).unwrap();

    // The store hands back exactly what is stored; the checksum exposes it
    let info = session.info().unwrap();
    assert_eq!(info.context, Some(json!({ "role": "admin" })));
    assert_eq!(current_user(&session).unwrap(), None);
}

#[test]
fn test_session_used_before_start_fails_fast() {
    let storage = MemoryStorage::new();
    let session = AmbientSession::new(storage).for_request(&request("/"));

    let err = login(&session, 1.into(), json!({})).unwrap_err();
    assert!(err.is_storage_not_ready());
    assert!(err.to_string().contains("session not started"));
}

#[test]
fn test_destroyed_session_forgets_login() {
    let storage = MemoryStorage::started();
    let session = AmbientSession::new(storage.clone());
    login(&session, 5.into(), json!(null)).unwrap();

    storage.destroy();
    storage.start();
    assert!(session.info().unwrap().is_empty());
}

#[test]
fn test_user_and_admin_logins_share_one_session() {
    let storage = MemoryStorage::started();
    let user = AmbientSession::with_config(
        storage.clone(),
        AuthSessionConfig::new("auth:user").unwrap(),
    );
    let admin = AmbientSession::with_config(
        storage.clone(),
        AuthSessionConfig::new("auth:admin").unwrap(),
    );

    login(&user, "alice".into(), json!({ "role": "user" })).unwrap();
    login(&admin, "root".into(), json!({ "role": "admin" })).unwrap();

    admin.clear().unwrap();
    assert_eq!(current_user(&user).unwrap(), Some(SubjectId::from("alice")));
    assert_eq!(current_user(&admin).unwrap(), None);
}

// =============================================================================
// Request-carried storage
// =============================================================================

#[test]
fn test_request_session_follows_middleware_storage() {
    // One storage per client, loaded by session middleware
    let alice_storage = MemoryStorage::started();
    let bob_storage = MemoryStorage::started();
    let sessions = RequestSession::new();

    let mut alice_req = request("/login");
    SessionHandle::new(alice_storage.clone()).attach(&mut alice_req);
    login(&sessions.for_request(&alice_req), "alice".into(), json!({})).unwrap();

    let mut bob_req = request("/me");
    SessionHandle::new(bob_storage.clone()).attach(&mut bob_req);
    let bob = sessions.for_request(&bob_req);
    assert_eq!(current_user(&bob).unwrap(), None);

    let mut alice_again = request("/me");
    SessionHandle::new(alice_storage).attach(&mut alice_again);
    let alice = sessions.for_request(&alice_again);
    assert_eq!(current_user(&alice).unwrap(), Some(SubjectId::from("alice")));
}

#[test]
fn test_request_without_session_middleware() {
    let sessions = RequestSession::new();
    let session = sessions.for_request(&request("/no-session"));
    assert!(current_user(&session).unwrap_err().is_storage_not_ready());
}

#[test]
fn test_log_level_can_be_adjusted() {
    let level = warden::warden_log::current_level();
    warden::warden_log::set_level(warden::warden_log::Level::Off);

    let session = AmbientSession::new(MemoryStorage::new());
    assert!(session.info().is_err());

    warden::warden_log::set_level(level);
}
