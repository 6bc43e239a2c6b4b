//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the startup config, the login gate and session-flag store, the
//! external collaborators (manager client, agent dispatcher), and a map of
//! per-session playground state. Collaborators are `None` when their config
//! is missing so dependent endpoints fail closed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::dispatch::AgentDispatcher;
use crate::manager::VoiceManager;
use crate::playground::Playground;
use crate::services::login::{CredentialGate, MemorySessionStore, SessionStore};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; inner fields are Arc-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gate: CredentialGate,
    pub sessions: Arc<dyn SessionStore>,
    pub manager: Option<Arc<dyn VoiceManager>>,
    pub dispatcher: Option<Arc<dyn AgentDispatcher>>,
    /// Keyed by session id. Like the session store, never evicted.
    pub playgrounds: Arc<RwLock<HashMap<String, Playground>>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: AppConfig,
        manager: Option<Arc<dyn VoiceManager>>,
        dispatcher: Option<Arc<dyn AgentDispatcher>>,
    ) -> Self {
        Self {
            gate: CredentialGate::new(config.login.clone()),
            config: Arc::new(config),
            sessions: Arc::new(MemorySessionStore::new()),
            manager,
            dispatcher,
            playgrounds: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
