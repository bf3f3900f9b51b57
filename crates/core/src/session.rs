//! Placeholder session guard.
//!
//! A single in-memory flag: `anonymous` until the fixed agent credentials
//! are presented, `anonymous` again after logout or process restart. There
//! is no token, no hashing and no expiry.
//!
//! The flag belongs to the process, not to a client: once the agent logs in,
//! every client of the console is authenticated until someone logs out.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

/// The only accepted username.
pub const AGENT_USERNAME: &str = "agent";

/// The only accepted password.
pub const AGENT_PASSWORD: &str = "password";

#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn is_agent(&self) -> bool {
        self.username == AGENT_USERNAME && self.password == AGENT_PASSWORD
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

#[derive(Debug, Default)]
pub struct SessionGuard {
    authenticated: AtomicBool,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.authenticated.load(Ordering::Acquire) {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Authenticate when `credentials` match the agent pair exactly.
    ///
    /// A mismatch leaves the current state as it was.
    pub fn login(&self, credentials: &Credentials) -> SessionState {
        if credentials.is_agent() {
            self.authenticated.store(true, Ordering::Release);
            tracing::info!(username = %credentials.username, "Agent logged in");
        } else {
            tracing::warn!(username = %credentials.username, "Rejected login attempt");
        }
        self.state()
    }

    pub fn logout(&self) -> SessionState {
        self.authenticated.store(false, Ordering::Release);
        SessionState::Anonymous
    }
}
