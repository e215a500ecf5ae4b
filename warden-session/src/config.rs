//! Auth session configuration.

use crate::error::{SessionError, SessionResult};
use std::env;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "auth";

/// Environment variable overriding the namespace.
pub const NAMESPACE_ENV: &str = "WARDEN_AUTH_SESSION_KEY";

/// Auth session configuration.
///
/// The namespace is the key the auth record is stored under. Give each
/// auth context its own namespace to keep several of them (tenants,
/// identities) in one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSessionConfig {
    /// Session key holding the auth record
    pub namespace: String,
}

impl Default for AuthSessionConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl AuthSessionConfig {
    /// Create a configuration with the given namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_session::AuthSessionConfig;
    ///
    /// let config = AuthSessionConfig::new("auth:admin").unwrap();
    /// assert_eq!(config.namespace, "auth:admin");
    ///
    /// assert!(AuthSessionConfig::new("  ").is_err());
    /// ```
    pub fn new(namespace: &str) -> SessionResult<Self> {
        let config = Self::default().with_namespace(namespace);
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration from `WARDEN_AUTH_SESSION_KEY`.
    ///
    /// Falls back to [`DEFAULT_NAMESPACE`] when the variable is unset.
    pub fn from_env() -> SessionResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load the configuration from an arbitrary variable lookup.
    ///
    /// ```
    /// use warden_session::{AuthSessionConfig, DEFAULT_NAMESPACE};
    ///
    /// let config = AuthSessionConfig::from_lookup(|_| None).unwrap();
    /// assert_eq!(config.namespace, DEFAULT_NAMESPACE);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> SessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(NAMESPACE_ENV) {
            Some(namespace) => Self::new(&namespace).map_err(|_| {
                SessionError::Config(format!("{} must not be empty", NAMESPACE_ENV))
            }),
            None => Ok(Self::default()),
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    /// Check that the namespace is usable as a session key.
    pub fn validate(&self) -> SessionResult<()> {
        if self.namespace.trim().is_empty() {
            return Err(SessionError::Config(
                "Auth session namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
