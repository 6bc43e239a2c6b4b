//! HTTP client for the voice-assistant manager API.
//!
//! Thin `reqwest` wrapper. Envelope and status handling live in pure
//! functions (`parse_list`, `parse_update`) so they can be tested without a
//! server.

use std::time::Duration;

use serde::de::DeserializeOwned;

use super::types::{
    Assistant, Envelope, ManagerError, SUCCESS_CODE, SpeedEmotionResult, SpeedEmotionUpdate, Voice, VoiceManager,
};
use crate::config::ManagerConfig;

pub const ASSISTANT_LIST_PATH: &str = "/api/voice-assistant/list";
pub const VOICE_LIST_PATH: &str = "/api/voice/cartesia/list";
pub const SPEED_EMOTION_UPDATE_PATH: &str = "/api/voice-assistant/update-voice-speed-emotio";

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpManagerClient {
    http: reqwest::Client,
    config: ManagerConfig,
}

impl HttpManagerClient {
    /// Build a client for the configured manager.
    ///
    /// # Errors
    ///
    /// Returns [`ManagerError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: ManagerConfig) -> Result<Self, ManagerError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ManagerError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ManagerError> {
        let response = self
            .http
            .get(self.url(path))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .send()
            .await
            .map_err(|e| ManagerError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ManagerError::Request(e.to_string()))?;

        parse_list(status, &text)
    }
}

#[async_trait::async_trait]
impl VoiceManager for HttpManagerClient {
    async fn list_assistants(&self) -> Result<Vec<Assistant>, ManagerError> {
        self.get_list(ASSISTANT_LIST_PATH).await
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, ManagerError> {
        self.get_list(VOICE_LIST_PATH).await
    }

    async fn update_speed_emotion(&self, update: &SpeedEmotionUpdate) -> Result<SpeedEmotionResult, ManagerError> {
        let response = self
            .http
            .put(self.url(SPEED_EMOTION_UPDATE_PATH))
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(update)
            .send()
            .await
            .map_err(|e| ManagerError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ManagerError::Request(e.to_string()))?;

        parse_update(status, &text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn check_status(status: u16, body: &str) -> Result<(), ManagerError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(ManagerError::Status { status, body: body.to_string() })
    }
}

fn parse_list<T: DeserializeOwned>(status: u16, body: &str) -> Result<Vec<T>, ManagerError> {
    check_status(status, body)?;

    let envelope: Envelope<Vec<T>> = serde_json::from_str(body).map_err(|e| ManagerError::Parse(e.to_string()))?;
    if envelope.code != SUCCESS_CODE {
        return Err(ManagerError::Rejected {
            code: envelope.code,
            msg: envelope.msg.unwrap_or_else(|| "list request failed".into()),
        });
    }

    Ok(envelope.data.unwrap_or_default())
}

fn parse_update(status: u16, body: &str) -> Result<SpeedEmotionResult, ManagerError> {
    check_status(status, body)?;

    let result: SpeedEmotionResult = serde_json::from_str(body).map_err(|e| ManagerError::Parse(e.to_string()))?;
    if result.code != SUCCESS_CODE {
        return Err(ManagerError::Rejected { code: result.code, msg: "speed/emotion update not applied".into() });
    }

    Ok(result)
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
