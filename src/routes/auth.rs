//! Auth routes — login gate and session flag lookup.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};

use crate::routes::error_body;
use crate::services::login::{self as login_svc, INVALID_CREDENTIALS, LoginOutcome};
use crate::state::AppState;

pub const COOKIE_NAME: &str = "voicedeck_session";

fn session_id_from(jar: &CookieJar) -> Option<String> {
    jar.get(COOKIE_NAME)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Session id of an authenticated caller.
/// Use as a handler parameter to require login.
pub struct AuthSession {
    pub session_id: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = session_id_from(&jar).ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = AppState::from_ref(state);
        if !app_state.sessions.is_authenticated(&session_id) {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(Self { session_id })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub authenticated: bool,
    /// Client must do a full page reload so route guards re-read the flag.
    pub reload: bool,
}

/// `POST /api/login` — check credentials, set the session cookie.
/// An unreadable body is treated as a mismatch.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Response {
    let outcome = match body {
        Ok(Json(body)) => login_svc::login(&state.gate, state.sessions.as_ref(), &body.username, &body.password),
        Err(rejection) => {
            tracing::info!(error = %rejection.body_text(), "login body rejected");
            LoginOutcome::Rejected
        }
    };
    match outcome {
        LoginOutcome::Authenticated { session_id } => {
            let cookie = Cookie::build((COOKIE_NAME, session_id))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.config.cookie_secure);
            let jar = jar.add(cookie);
            (jar, Json(LoginResponse { authenticated: true, reload: true })).into_response()
        }
        LoginOutcome::Rejected => (StatusCode::UNAUTHORIZED, error_body(INVALID_CREDENTIALS)).into_response(),
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
}

/// `GET /api/session` — report whether the caller's session is logged in.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> Json<SessionResponse> {
    let authenticated = session_id_from(&jar).is_some_and(|id| state.sessions.is_authenticated(&id));
    Json(SessionResponse { authenticated })
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
