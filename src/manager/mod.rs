//! Manager — client for the external voice-assistant manager service.
//!
//! DESIGN
//! ======
//! Listing endpoints feed the assistant and voice pickers; the update
//! endpoint receives speed/emotion changes. Handlers and services depend on
//! the `VoiceManager` trait so tests can substitute a mock.

pub mod http;
pub mod types;

pub use http::HttpManagerClient;
pub use types::{Assistant, ManagerError, SpeedEmotionResult, SpeedEmotionUpdate, Voice, VoiceManager};
