//! Dispatch proxy route — `POST /api/dispatch`.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::dispatch::DispatchError;
use crate::routes::error_body;
use crate::services::dispatch::dispatch_agent;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchBody {
    pub room_name: String,
    pub agent_name: String,
}

/// `POST /api/dispatch` — dispatch an agent into a room.
///
/// Every failure is a 503 with the error text as `message`. Configuration
/// is checked before the body is read.
pub async fn dispatch(
    State(state): State<AppState>,
    body: Result<Json<DispatchBody>, JsonRejection>,
) -> Response {
    let Some(dispatcher) = state.dispatcher.as_deref() else {
        let e = DispatchError::NotConfigured;
        tracing::error!(error = %e, "dispatch failed");
        return (dispatch_error_to_status(&e), error_body(e.to_string())).into_response();
    };

    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "dispatch body rejected");
            return (StatusCode::SERVICE_UNAVAILABLE, error_body(rejection.body_text())).into_response();
        }
    };

    match dispatch_agent(Some(dispatcher), &body.room_name, &body.agent_name).await {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => {
            tracing::error!(error = %e, room = %body.room_name, agent = %body.agent_name, "dispatch failed");
            (dispatch_error_to_status(&e), error_body(e.to_string())).into_response()
        }
    }
}

pub(crate) fn dispatch_error_to_status(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::NotConfigured | DispatchError::Service(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Any non-POST method on the dispatch route.
pub async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, error_body("Method not allowed")).into_response()
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
