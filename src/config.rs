//! Runtime configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every value is resolved once at startup into `AppConfig` and handed to
//! handlers through `AppState`. Each external collaborator has its own
//! optional section: when any required variable of a section is missing or
//! empty the section is `None` and the dependent feature fails closed.

use std::fmt;

pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// SECTIONS
// =============================================================================

/// Reference credentials for the login gate.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Voice-assistant manager API location and Basic-auth pair.
#[derive(Clone, PartialEq, Eq)]
pub struct ManagerConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout_secs: Option<u64>,
}

impl fmt::Debug for ManagerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// LiveKit server credentials used by the dispatch proxy.
#[derive(Clone, PartialEq, Eq)]
pub struct LiveKitConfig {
    pub url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveKitConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub cookie_secure: bool,
    pub login: Option<LoginCredentials>,
    pub manager: Option<ManagerConfig>,
    pub livekit: Option<LiveKitConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: boolean, default false
    /// - `WEB_USERNAME`, `WEB_PASSWORD`: login gate reference pair
    /// - `VOICE_ASSISTANT_MANAGER_URL`, `BASIC_AUTH_USERNAME`, `BASIC_AUTH_PASSWORD`
    /// - `MANAGER_REQUEST_TIMEOUT_SECS`
    /// - `LIVEKIT_HTTPS_URL`, `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET`
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT`, `COOKIE_SECURE` or the timeout cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "COOKIE_SECURE", value: raw })?,
            None => false,
        };

        let login = match (get("WEB_USERNAME"), get("WEB_PASSWORD")) {
            (Some(username), Some(password)) => Some(LoginCredentials { username, password }),
            _ => None,
        };

        let request_timeout_secs = match get("MANAGER_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::Invalid { var: "MANAGER_REQUEST_TIMEOUT_SECS", value: raw.clone() })?,
            ),
            None => None,
        };

        let manager = match (get("VOICE_ASSISTANT_MANAGER_URL"), get("BASIC_AUTH_USERNAME"), get("BASIC_AUTH_PASSWORD")) {
            (Some(base_url), Some(username), Some(password)) => Some(ManagerConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                username,
                password,
                request_timeout_secs,
            }),
            _ => None,
        };

        let livekit = match (get("LIVEKIT_HTTPS_URL"), get("LIVEKIT_API_KEY"), get("LIVEKIT_API_SECRET")) {
            (Some(url), Some(api_key), Some(api_secret)) => Some(LiveKitConfig { url, api_key, api_secret }),
            _ => None,
        };

        Ok(Self { port, cookie_secure, login, manager, livekit })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
