//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the control panel's JSON API under a single Axum router. Login and
//! session lookup are open; picker and settings endpoints require an
//! authenticated session cookie; the dispatch proxy is open like the page
//! that calls it.

pub mod auth;
pub mod dispatch;
pub mod playground;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Error body shared by every JSON error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

pub(crate) fn error_body(message: impl Into<String>) -> Json<ErrorBody> {
    Json(ErrorBody { message: message.into() })
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/session", get(auth::session))
        .route("/api/assistants", get(playground::list_assistants))
        .route("/api/assistants/refresh", post(playground::refresh_assistants))
        .route(
            "/api/assistants/select",
            post(playground::select_assistant).delete(playground::clear_assistant),
        )
        .route("/api/voices", get(playground::list_voices))
        .route("/api/voices/refresh", post(playground::refresh_voices))
        .route("/api/voices/select", post(playground::select_voice).delete(playground::clear_voice))
        .route("/api/voices/open", post(playground::open_voices))
        .route("/api/voices/close", post(playground::close_voices))
        .route("/api/settings", get(playground::get_settings).patch(playground::edit_settings))
        .route("/api/settings/open", post(playground::open_settings))
        .route("/api/settings/defaults", post(playground::apply_settings_defaults))
        .route("/api/settings/close", post(playground::close_settings))
        .route("/api/inputs", get(playground::get_inputs))
        .route("/api/inputs/{input}/toggle", post(playground::toggle_input))
        .route("/api/dispatch", post(dispatch::dispatch).fallback(dispatch::method_not_allowed))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
