//! Agent dispatch — asks the real-time room service to send an agent into a room.
//!
//! DESIGN
//! ======
//! The proxy endpoint only needs "create a dispatch, then count the room's
//! dispatches". `AgentDispatcher` captures exactly that so the route can be
//! tested without a LiveKit server.

pub mod livekit;

use serde::{Deserialize, Serialize};

pub use livekit::LiveKitDispatcher;

/// Metadata `type` tag attached to every dispatch.
pub const DISPATCH_KIND: &str = "voice_assistant";
/// Metadata `version` attached to every dispatch.
pub const DISPATCH_METADATA_VERSION: &str = "1.0";

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Missing LiveKit configuration")]
    NotConfigured,

    /// Any failure reported by the LiveKit service client.
    #[error("{0}")]
    Service(String),
}

/// A dispatch as returned to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRecord {
    pub id: String,
    pub agent_name: String,
    pub room: String,
    pub metadata: String,
}

/// Dispatch metadata JSON: `{type, role, version}`.
#[must_use]
pub fn dispatch_metadata(agent_name: &str) -> String {
    serde_json::json!({
        "type": DISPATCH_KIND,
        "role": agent_name,
        "version": DISPATCH_METADATA_VERSION,
    })
    .to_string()
}

#[async_trait::async_trait]
pub trait AgentDispatcher: Send + Sync {
    /// Create a dispatch of `agent_name` into `room_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Service`] if the room service call fails.
    async fn create_dispatch(&self, room_name: &str, agent_name: &str) -> Result<DispatchRecord, DispatchError>;

    /// List the dispatches currently attached to `room_name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Service`] if the room service call fails.
    async fn list_dispatches(&self, room_name: &str) -> Result<Vec<DispatchRecord>, DispatchError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
