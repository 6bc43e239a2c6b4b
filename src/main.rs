mod config;
mod dispatch;
mod manager;
mod playground;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use dispatch::{AgentDispatcher, LiveKitDispatcher};
use manager::{HttpManagerClient, VoiceManager};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let port = config.port;

    if config.login.is_none() {
        tracing::warn!("WEB_USERNAME/WEB_PASSWORD not set; every login will be rejected");
    }

    let manager: Option<Arc<dyn VoiceManager>> = match config.manager.clone() {
        Some(manager_config) => {
            tracing::info!(base_url = %manager_config.base_url, "voice-assistant manager configured");
            let client = HttpManagerClient::new(manager_config).expect("manager client init failed");
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("manager not configured; assistant and voice lists will be empty");
            None
        }
    };

    let dispatcher: Option<Arc<dyn AgentDispatcher>> = match &config.livekit {
        Some(livekit) => {
            tracing::info!(url = %livekit.url, "livekit dispatch configured");
            Some(Arc::new(LiveKitDispatcher::new(livekit)))
        }
        None => {
            tracing::warn!("LIVEKIT_* not set; dispatch requests will return 503");
            None
        }
    };

    let state = state::AppState::new(config, manager, dispatcher);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "voicedeck listening");
    axum::serve(listener, app).await.expect("server failed");
}
