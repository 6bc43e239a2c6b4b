//! Login gate and session-flag store.
//!
//! ARCHITECTURE
//! ============
//! The gate compares submitted credentials against the configured reference
//! pair and nothing else: no hashing, lockout, or expiry. A successful login
//! records a single "authenticated" flag for the caller's session id in a
//! `SessionStore`; the flag lives until the process exits.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::RwLock;

use rand::Rng;

use crate::config::LoginCredentials;

/// Message shown for any failed login. Never reveals which field was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex session id.
#[must_use]
pub fn generate_session_id() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

// =============================================================================
// CREDENTIAL GATE
// =============================================================================

#[derive(Debug, Clone)]
pub struct CredentialGate {
    reference: Option<LoginCredentials>,
}

impl CredentialGate {
    #[must_use]
    pub fn new(reference: Option<LoginCredentials>) -> Self {
        Self { reference }
    }

    /// True only for an exact match with the configured pair. Fails closed
    /// when no pair is configured.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.reference
            .as_ref()
            .is_some_and(|r| r.username == username && r.password == password)
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Holds the per-session authentication flag.
pub trait SessionStore: Send + Sync {
    fn mark_authenticated(&self, session_id: &str);
    fn is_authenticated(&self, session_id: &str) -> bool;
}

/// Process-local flag set. Entries are never evicted; the set is bounded
/// only by process lifetime.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    authenticated: RwLock<HashSet<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn mark_authenticated(&self, session_id: &str) {
        if let Ok(mut set) = self.authenticated.write() {
            set.insert(session_id.to_owned());
        }
    }

    fn is_authenticated(&self, session_id: &str) -> bool {
        self.authenticated
            .read()
            .map(|set| set.contains(session_id))
            .unwrap_or(false)
    }
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; the new session id is already marked.
    Authenticated { session_id: String },
    Rejected,
}

/// Check credentials and, on success, record a fresh authenticated session.
pub fn login(gate: &CredentialGate, store: &dyn SessionStore, username: &str, password: &str) -> LoginOutcome {
    if !gate.verify(username, password) {
        tracing::info!("login rejected");
        return LoginOutcome::Rejected;
    }

    let session_id = generate_session_id();
    store.mark_authenticated(&session_id);
    tracing::info!("login accepted");
    LoginOutcome::Authenticated { session_id }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
