//! Manager types — wire shapes, errors, and the client trait.
//!
//! The voice-assistant manager answers every call with a JSON envelope whose
//! `code` field signals success (`1000`) independently of the HTTP status.

use serde::{Deserialize, Serialize};

/// Envelope `code` value the manager uses for success.
pub const SUCCESS_CODE: i64 = 1000;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by manager client operations.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// Base URL or Basic-auth credentials are not configured.
    #[error("voice-assistant manager not configured")]
    NotConfigured,

    /// The HTTP request could not be sent or the body could not be read.
    #[error("manager request failed: {0}")]
    Request(String),

    /// The manager returned a non-success HTTP status.
    #[error("manager response error: status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("manager response parse failed: {0}")]
    Parse(String),

    /// The envelope carried a non-success `code`.
    #[error("manager rejected request (code {code}): {msg}")]
    Rejected { code: i64, msg: String },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// LIST ITEMS
// =============================================================================

/// A configured voice assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A synthesis voice offered by the TTS vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub language: String,
}

/// Generic manager response envelope for listing endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    pub data: Option<T>,
    pub msg: Option<String>,
}

// =============================================================================
// SPEED / EMOTION UPDATE
// =============================================================================

/// Body of `PUT /api/voice-assistant/update-voice-speed-emotio`.
///
/// Field names match the manager's API, including its spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedEmotionUpdate {
    pub voice_speed: String,
    pub voice_emotio: String,
}

/// Manager reply to a speed/emotion update. The `now_*` values are the
/// manager's view after the update and may differ from what was sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedEmotionResult {
    pub code: i64,
    #[serde(default)]
    pub now_voice_speed: String,
    #[serde(default)]
    pub now_voice_emotion: String,
}

// =============================================================================
// CLIENT TRAIT
// =============================================================================

/// Async access to the voice-assistant manager. Enables mocking in tests.
#[async_trait::async_trait]
pub trait VoiceManager: Send + Sync {
    /// Fetch the assistant list.
    ///
    /// # Errors
    ///
    /// Returns a [`ManagerError`] on transport failure, non-2xx status, bad
    /// JSON, or a non-success envelope code.
    async fn list_assistants(&self) -> Result<Vec<Assistant>, ManagerError>;

    /// Fetch the voice list.
    ///
    /// # Errors
    ///
    /// Same as [`VoiceManager::list_assistants`].
    async fn list_voices(&self) -> Result<Vec<Voice>, ManagerError>;

    /// Push a speed/emotion update.
    ///
    /// # Errors
    ///
    /// Same as [`VoiceManager::list_assistants`].
    async fn update_speed_emotion(&self, update: &SpeedEmotionUpdate) -> Result<SpeedEmotionResult, ManagerError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
