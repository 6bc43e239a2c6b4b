//! Playground routes — assistant/voice pickers and the speed/emotion editor.
//!
//! All handlers require an authenticated session and operate on that
//! session's `Playground`, creating it on first use.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::manager::{Assistant, Voice};
use crate::playground::Playground;
use crate::playground::inputs::{Input, InputSettings};
use crate::playground::speed_emotion::{Emotion, EmotionLevel, Speed, SpeedEmotionEditor, SyncedSnapshot};
use crate::playground::voices::{
    VoiceFilter, available_languages, filter_voices, flag_country_code, language_name, voice_label,
};
use crate::routes::auth::AuthSession;
use crate::services::catalog::{self, RefreshOutcome};
use crate::services::settings::{self, SyncOutcome};
use crate::state::AppState;

async fn with_playground<R>(state: &AppState, session_id: &str, f: impl FnOnce(&mut Playground) -> R) -> R {
    let mut playgrounds = state.playgrounds.write().await;
    f(playgrounds.entry(session_id.to_owned()).or_default())
}

// =============================================================================
// ASSISTANTS
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantsResponse {
    pub assistants: Vec<Assistant>,
    pub selected: Option<Assistant>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse<T> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub auto_selected: Option<T>,
    pub error: Option<String>,
}

impl<T> From<RefreshOutcome<T>> for RefreshResponse<T> {
    fn from(outcome: RefreshOutcome<T>) -> Self {
        Self {
            items: outcome.items,
            selected: outcome.selected,
            auto_selected: outcome.auto_selected,
            error: outcome.error,
        }
    }
}

#[derive(Deserialize)]
pub struct SelectBody {
    pub id: String,
}

/// `GET /api/assistants` — current in-memory list and selection.
pub async fn list_assistants(State(state): State<AppState>, auth: AuthSession) -> Json<AssistantsResponse> {
    let response = with_playground(&state, &auth.session_id, |p| AssistantsResponse {
        assistants: p.assistants.items().to_vec(),
        selected: p.assistants.selected().cloned(),
    })
    .await;
    Json(response)
}

/// `POST /api/assistants/refresh` — fetch the list from the manager.
pub async fn refresh_assistants(State(state): State<AppState>, auth: AuthSession) -> Json<RefreshResponse<Assistant>> {
    Json(catalog::refresh_assistants(&state, &auth.session_id).await.into())
}

/// `POST /api/assistants/select` — select an assistant by id.
pub async fn select_assistant(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(body): Json<SelectBody>,
) -> Result<Json<Assistant>, StatusCode> {
    with_playground(&state, &auth.session_id, |p| p.assistants.select(&body.id).cloned())
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `DELETE /api/assistants/select` — drop the selection; the first item is
/// selected again if the list is non-empty.
pub async fn clear_assistant(State(state): State<AppState>, auth: AuthSession) -> Json<AssistantsResponse> {
    let response = with_playground(&state, &auth.session_id, |p| {
        p.assistants.clear_selection();
        AssistantsResponse {
            assistants: p.assistants.items().to_vec(),
            selected: p.assistants.selected().cloned(),
        }
    })
    .await;
    Json(response)
}

// =============================================================================
// VOICES
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceEntry {
    #[serde(flatten)]
    pub voice: Voice,
    pub label: String,
    pub flag: String,
}

impl From<&Voice> for VoiceEntry {
    fn from(voice: &Voice) -> Self {
        Self {
            label: voice_label(voice),
            flag: flag_country_code(&voice.language),
            voice: voice.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub name: String,
    pub flag: String,
}

impl LanguageOption {
    fn of(code: String) -> Self {
        Self { name: language_name(&code), flag: flag_country_code(&code), code }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceEntry>,
    pub languages: Vec<LanguageOption>,
    pub filter: VoiceFilter,
    pub selected: Option<VoiceEntry>,
    pub open: bool,
}

fn voices_view(p: &Playground) -> VoicesResponse {
    let items = p.voices.items();
    VoicesResponse {
        voices: filter_voices(items, &p.voice_filter).into_iter().map(VoiceEntry::from).collect(),
        languages: available_languages(items).into_iter().map(LanguageOption::of).collect(),
        filter: p.voice_filter.clone(),
        selected: p.voices.selected().map(VoiceEntry::from),
        open: p.voices.is_open(),
    }
}

/// `GET /api/voices?search=&language=` — filter the in-memory voice list.
/// The filter is remembered for the session.
pub async fn list_voices(
    State(state): State<AppState>,
    auth: AuthSession,
    Query(filter): Query<VoiceFilter>,
) -> Json<VoicesResponse> {
    let response = with_playground(&state, &auth.session_id, |p| {
        p.voice_filter = filter;
        voices_view(p)
    })
    .await;
    Json(response)
}

/// `POST /api/voices/refresh` — fetch the voice list from the manager.
pub async fn refresh_voices(State(state): State<AppState>, auth: AuthSession) -> Json<RefreshResponse<Voice>> {
    Json(catalog::refresh_voices(&state, &auth.session_id).await.into())
}

/// `POST /api/voices/select` — select a voice and close the picker.
pub async fn select_voice(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(body): Json<SelectBody>,
) -> Result<Json<VoiceEntry>, StatusCode> {
    with_playground(&state, &auth.session_id, |p| p.voices.select(&body.id).map(VoiceEntry::from))
        .await
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `DELETE /api/voices/select` — drop the selection and re-apply the default.
pub async fn clear_voice(State(state): State<AppState>, auth: AuthSession) -> Json<VoicesResponse> {
    let response = with_playground(&state, &auth.session_id, |p| {
        p.voices.clear_selection();
        voices_view(p)
    })
    .await;
    Json(response)
}

/// `POST /api/voices/open`
pub async fn open_voices(State(state): State<AppState>, auth: AuthSession) -> Json<VoicesResponse> {
    let response = with_playground(&state, &auth.session_id, |p| {
        p.voices.open();
        voices_view(p)
    })
    .await;
    Json(response)
}

/// `POST /api/voices/close`
pub async fn close_voices(State(state): State<AppState>, auth: AuthSession) -> Json<VoicesResponse> {
    let response = with_playground(&state, &auth.session_id, |p| {
        p.voices.close();
        voices_view(p)
    })
    .await;
    Json(response)
}

// =============================================================================
// SPEED / EMOTION
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct EmotionView {
    pub emotion: Emotion,
    pub level: Option<EmotionLevel>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SettingsView {
    pub open: bool,
    pub speed: Speed,
    pub speed_label: String,
    pub speed_description: String,
    pub speed_value: f64,
    pub emotions: Vec<EmotionView>,
    pub previous: SyncedSnapshot,
    pub dirty: bool,
}

impl From<&SpeedEmotionEditor> for SettingsView {
    fn from(editor: &SpeedEmotionEditor) -> Self {
        let speed = editor.draft().speed;
        Self {
            open: editor.is_open(),
            speed,
            speed_label: speed.label().to_string(),
            speed_description: speed.description().to_string(),
            speed_value: speed.value(),
            emotions: editor
                .draft()
                .emotions()
                .map(|(emotion, level)| EmotionView { emotion, level })
                .collect(),
            previous: editor.previous().clone(),
            dirty: editor.has_changes(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmotionEdit {
    pub emotion: Emotion,
    /// `null` resets the emotion to none.
    pub level: Option<EmotionLevel>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsEdit {
    pub speed: Option<Speed>,
    /// Slider click position, `0.0..=1.0` across the track.
    pub speed_fraction: Option<f64>,
    pub emotion: Option<EmotionEdit>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsDefaults {
    pub speed: Option<String>,
    pub emotion: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CloseResponse {
    pub sync: SyncOutcome,
    pub settings: SettingsView,
}

/// `GET /api/settings`
pub async fn get_settings(State(state): State<AppState>, auth: AuthSession) -> Json<SettingsView> {
    Json(with_playground(&state, &auth.session_id, |p| SettingsView::from(&p.speed_emotion)).await)
}

/// `POST /api/settings/open`
pub async fn open_settings(State(state): State<AppState>, auth: AuthSession) -> Json<SettingsView> {
    let view = with_playground(&state, &auth.session_id, |p| {
        p.speed_emotion.open();
        SettingsView::from(&p.speed_emotion)
    })
    .await;
    Json(view)
}

/// `PATCH /api/settings` — edit the draft. Nothing is sent to the manager.
pub async fn edit_settings(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(edit): Json<SettingsEdit>,
) -> Json<SettingsView> {
    let view = with_playground(&state, &auth.session_id, |p| {
        let editor = &mut p.speed_emotion;
        if let Some(speed) = edit.speed {
            editor.set_speed(speed);
        }
        if let Some(fraction) = edit.speed_fraction {
            editor.set_speed_from_fraction(fraction);
        }
        match edit.emotion {
            Some(EmotionEdit { emotion, level: Some(level) }) => editor.set_emotion(emotion, level),
            Some(EmotionEdit { emotion, level: None }) => editor.reset_emotion(emotion),
            None => {}
        }
        SettingsView::from(&*editor)
    })
    .await;
    Json(view)
}

/// `POST /api/settings/defaults` — seed the editor from the page's defaults.
pub async fn apply_settings_defaults(
    State(state): State<AppState>,
    auth: AuthSession,
    Json(defaults): Json<SettingsDefaults>,
) -> Json<SettingsView> {
    let view = with_playground(&state, &auth.session_id, |p| {
        p.speed_emotion
            .apply_defaults(defaults.speed.as_deref(), defaults.emotion.as_deref());
        SettingsView::from(&p.speed_emotion)
    })
    .await;
    Json(view)
}

/// `POST /api/settings/close` — close the editor, syncing if the draft changed.
pub async fn close_settings(State(state): State<AppState>, auth: AuthSession) -> Json<CloseResponse> {
    let sync = settings::close_and_sync(&state, &auth.session_id).await;
    let settings = with_playground(&state, &auth.session_id, |p| SettingsView::from(&p.speed_emotion)).await;
    Json(CloseResponse { sync, settings })
}

// =============================================================================
// INPUTS
// =============================================================================

/// `GET /api/inputs`
pub async fn get_inputs(State(state): State<AppState>, auth: AuthSession) -> Json<InputSettings> {
    Json(with_playground(&state, &auth.session_id, |p| p.inputs).await)
}

/// `POST /api/inputs/{input}/toggle` — flip the camera or mic flag.
pub async fn toggle_input(
    State(state): State<AppState>,
    auth: AuthSession,
    Path(input): Path<Input>,
) -> Json<InputSettings> {
    Json(with_playground(&state, &auth.session_id, |p| p.inputs.toggle(input)).await)
}

#[cfg(test)]
#[path = "playground_test.rs"]
mod tests;
