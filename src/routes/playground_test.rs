use std::sync::Arc;

use crate::manager::VoiceManager;
use crate::routes::app;
use crate::routes::tests::{request, send};
use crate::state::AppState;
use crate::state::test_helpers::{MockManager, assistant, seed_session, test_app_state, test_app_state_with, voice};
use axum::Router;
use axum::http::StatusCode;
use serde_json::{Value, json};

fn mock() -> Arc<MockManager> {
    Arc::new(MockManager::with_lists(
        vec![assistant("a1", "Receptionist"), assistant("a2", "Tutor")],
        vec![
            voice("v1", "Calm narrator with warm tone", "en"),
            voice("v2", "Energetic presenter", "fr"),
            voice("v3", "Deep calm voice", "en"),
        ],
    ))
}

fn setup(manager: &Arc<MockManager>) -> (AppState, Router, String) {
    let state = test_app_state_with(Some(manager.clone() as Arc<dyn VoiceManager>), None);
    let session = seed_session(&state);
    (state.clone(), app(state), session)
}

async fn call(app: &Router, session: &str, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, _, json) = send(app, request(method, uri, Some(session), body)).await;
    (status, json)
}

// =============================================================================
// Assistants
// =============================================================================

#[tokio::test]
async fn refresh_assistants_auto_selects_first() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    let (status, body) = call(&app, &session, "POST", "/api/assistants/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["auto_selected"]["id"], "a1");
    assert_eq!(body["selected"]["id"], "a1");
    assert_eq!(body["error"], Value::Null);

    let (_, body) = call(&app, &session, "GET", "/api/assistants", None).await;
    assert_eq!(body["selected"]["name"], "Receptionist");
}

#[tokio::test]
async fn second_refresh_keeps_user_selection() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    call(&app, &session, "POST", "/api/assistants/refresh", None).await;
    let (status, body) = call(&app, &session, "POST", "/api/assistants/select", Some(json!({ "id": "a2" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Tutor");

    let (_, body) = call(&app, &session, "POST", "/api/assistants/refresh", None).await;
    assert_eq!(body["auto_selected"], Value::Null);
    assert_eq!(body["selected"]["id"], "a2");
}

#[tokio::test]
async fn cleared_selection_falls_back_to_first() {
    let manager = mock();
    let (_, app, session) = setup(&manager);
    call(&app, &session, "POST", "/api/assistants/refresh", None).await;
    call(&app, &session, "POST", "/api/assistants/select", Some(json!({ "id": "a2" }))).await;

    let (status, body) = call(&app, &session, "DELETE", "/api/assistants/select", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["selected"]["id"], "a1");

    call(&app, &session, "POST", "/api/voices/refresh", None).await;
    call(&app, &session, "POST", "/api/voices/select", Some(json!({ "id": "v3" }))).await;
    let (_, body) = call(&app, &session, "DELETE", "/api/voices/select", None).await;
    assert_eq!(body["selected"]["id"], "v1");
}

#[tokio::test]
async fn select_unknown_assistant_is_404() {
    let manager = mock();
    let (_, app, session) = setup(&manager);
    call(&app, &session, "POST", "/api/assistants/refresh", None).await;

    let (status, _) = call(&app, &session, "POST", "/api/assistants/select", Some(json!({ "id": "zz" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn failed_refresh_reports_error_with_empty_list() {
    let manager = Arc::new(MockManager { fail_lists: true, ..MockManager::default() });
    let (_, app, session) = setup(&manager);

    let (status, body) = call(&app, &session, "POST", "/api/assistants/refresh", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["selected"], Value::Null);
    assert!(body["error"].as_str().unwrap().contains("5000"));
}

#[tokio::test]
async fn refresh_without_manager_reports_not_configured() {
    let state = test_app_state();
    let session = seed_session(&state);
    let app = app(state);

    let (_, body) = call(&app, &session, "POST", "/api/voices/refresh", None).await;
    assert_eq!(body["error"], "voice-assistant manager not configured");
}

#[tokio::test]
async fn sessions_have_independent_playgrounds() {
    let manager = mock();
    let (state, app, first) = setup(&manager);
    let second = seed_session(&state);

    call(&app, &first, "POST", "/api/assistants/refresh", None).await;
    let (_, body) = call(&app, &second, "GET", "/api/assistants", None).await;
    assert_eq!(body["assistants"], json!([]));
    assert_eq!(body["selected"], Value::Null);
}

// =============================================================================
// Voices
// =============================================================================

#[tokio::test]
async fn voices_filter_by_search_and_language() {
    let manager = mock();
    let (_, app, session) = setup(&manager);
    call(&app, &session, "POST", "/api/voices/refresh", None).await;

    let (status, body) = call(&app, &session, "GET", "/api/voices?search=CALM", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["voices"].as_array().unwrap().iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["v1", "v3"]);
    let codes: Vec<&str> = body["languages"].as_array().unwrap().iter().map(|l| l["code"].as_str().unwrap()).collect();
    assert_eq!(codes, ["all", "en", "fr"]);
    assert_eq!(body["languages"][0]["name"], "Any language");
    assert_eq!(body["languages"][1], json!({ "code": "en", "name": "English", "flag": "us" }));
    assert_eq!(body["filter"], json!({ "search": "CALM", "language": "all" }));

    let (_, body) = call(&app, &session, "GET", "/api/voices?language=fr", None).await;
    let ids: Vec<&str> = body["voices"].as_array().unwrap().iter().map(|v| v["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["v2"]);
}

#[tokio::test]
async fn voice_entries_carry_labels() {
    let manager = mock();
    let (_, app, session) = setup(&manager);
    let (_, body) = call(&app, &session, "POST", "/api/voices/refresh", None).await;
    assert_eq!(body["selected"]["id"], "v1");

    let (_, body) = call(&app, &session, "GET", "/api/voices", None).await;
    assert_eq!(body["voices"][0]["label"], "English - Calm narrator with w...");
    assert_eq!(body["selected"]["label"], "English - Calm narrator with w...");
    assert_eq!(body["voices"][0]["flag"], "us");
}

#[tokio::test]
async fn selecting_a_voice_closes_the_picker() {
    let manager = mock();
    let (_, app, session) = setup(&manager);
    call(&app, &session, "POST", "/api/voices/refresh", None).await;

    let (_, body) = call(&app, &session, "POST", "/api/voices/open", None).await;
    assert_eq!(body["open"], true);

    let (status, body) = call(&app, &session, "POST", "/api/voices/select", Some(json!({ "id": "v2" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "French - Energetic presenter...");

    let (_, body) = call(&app, &session, "GET", "/api/voices", None).await;
    assert_eq!(body["open"], false);
    assert_eq!(body["selected"]["id"], "v2");
}

#[tokio::test]
async fn close_voices_keeps_selection() {
    let manager = mock();
    let (_, app, session) = setup(&manager);
    call(&app, &session, "POST", "/api/voices/refresh", None).await;
    call(&app, &session, "POST", "/api/voices/open", None).await;

    let (_, body) = call(&app, &session, "POST", "/api/voices/close", None).await;
    assert_eq!(body["open"], false);
    assert_eq!(body["selected"]["id"], "v1");
}

// =============================================================================
// Speed / emotion
// =============================================================================

#[tokio::test]
async fn settings_start_at_normal_and_clean() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    let (_, body) = call(&app, &session, "GET", "/api/settings", None).await;
    assert_eq!(body["open"], false);
    assert_eq!(body["speed"], "normal");
    assert_eq!(body["speed_label"], "Normal");
    assert_eq!(body["speed_value"], 0.0);
    assert_eq!(body["dirty"], false);
    assert_eq!(body["previous"], json!({ "speed": "normal", "emotion": "" }));
    assert_eq!(body["emotions"].as_array().unwrap().len(), 5);
    assert_eq!(body["emotions"][0], json!({ "emotion": "anger", "level": null }));
}

#[tokio::test]
async fn untouched_close_sends_nothing() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    call(&app, &session, "POST", "/api/settings/open", None).await;
    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["sync"], json!({ "status": "unchanged" }));
    assert_eq!(body["settings"]["open"], false);
    assert_eq!(manager.update_count(), 0);
}

#[tokio::test]
async fn edited_close_sends_one_update_then_settles() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    let (_, body) = call(&app, &session, "POST", "/api/settings/open", None).await;
    assert_eq!(body["open"], true);

    let edit = json!({ "speed": "fast", "emotion": { "emotion": "anger", "level": "high" } });
    let (status, body) = call(&app, &session, "PATCH", "/api/settings", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dirty"], true);
    assert_eq!(manager.update_count(), 0);

    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["sync"]["status"], "synced");
    assert_eq!(body["sync"]["result"]["now_voice_speed"], "fast");
    assert_eq!(body["settings"]["previous"], json!({ "speed": "fast", "emotion": "anger:high" }));
    assert_eq!(body["settings"]["dirty"], false);

    {
        let updates = manager.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].voice_speed, "fast");
        assert_eq!(updates[0].voice_emotio, "anger:high");
    }

    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["sync"]["status"], "unchanged");
    assert_eq!(manager.update_count(), 1);
}

#[tokio::test]
async fn reverting_an_edit_before_close_sends_nothing() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    call(&app, &session, "PATCH", "/api/settings", Some(json!({ "emotion": { "emotion": "sadness", "level": "low" } }))).await;
    let (_, body) =
        call(&app, &session, "PATCH", "/api/settings", Some(json!({ "emotion": { "emotion": "sadness", "level": null } }))).await;
    assert_eq!(body["dirty"], false);

    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["sync"]["status"], "unchanged");
    assert_eq!(manager.update_count(), 0);
}

#[tokio::test]
async fn slider_fraction_snaps_to_nearest_speed() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    let (_, body) = call(&app, &session, "PATCH", "/api/settings", Some(json!({ "speed_fraction": 0.0 }))).await;
    assert_eq!(body["speed"], "slowest");
    assert_eq!(body["speed_description"], "Very slow speech");

    let (_, body) = call(&app, &session, "PATCH", "/api/settings", Some(json!({ "speed_fraction": 0.8 }))).await;
    assert_eq!(body["speed"], "fast");
}

#[tokio::test]
async fn failed_sync_keeps_draft_and_retries_on_next_close() {
    let manager = Arc::new(MockManager { fail_updates: true, ..MockManager::default() });
    let (_, app, session) = setup(&manager);

    call(&app, &session, "PATCH", "/api/settings", Some(json!({ "speed": "slow" }))).await;
    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["sync"]["status"], "failed");
    assert!(body["sync"]["error"].as_str().unwrap().contains("connection reset"));
    assert_eq!(body["settings"]["speed"], "slow");
    assert_eq!(body["settings"]["previous"]["speed"], "normal");
    assert_eq!(body["settings"]["dirty"], true);

    call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(manager.update_count(), 2);
}

#[tokio::test]
async fn snapshot_follows_manager_reply_not_request() {
    let manager = Arc::new(MockManager { override_speed: Some("slow".into()), ..MockManager::default() });
    let (_, app, session) = setup(&manager);

    call(&app, &session, "PATCH", "/api/settings", Some(json!({ "speed": "fast" }))).await;
    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["settings"]["previous"]["speed"], "slow");
    assert_eq!(body["settings"]["speed"], "fast");
    assert_eq!(body["settings"]["dirty"], true);
}

#[tokio::test]
async fn defaults_seed_draft_and_snapshot() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    let defaults = json!({ "speed": "Fast", "emotion": "sadness:low,curiosity:highest" });
    let (_, body) = call(&app, &session, "POST", "/api/settings/defaults", Some(defaults)).await;
    assert_eq!(body["speed"], "fast");
    assert_eq!(body["dirty"], false);
    assert_eq!(body["previous"], json!({ "speed": "fast", "emotion": "sadness:low,curiosity:highest" }));
    assert_eq!(body["emotions"][3], json!({ "emotion": "sadness", "level": "low" }));
    assert_eq!(body["emotions"][4], json!({ "emotion": "curiosity", "level": "highest" }));

    let (_, body) = call(&app, &session, "POST", "/api/settings/close", None).await;
    assert_eq!(body["sync"]["status"], "unchanged");
}

// =============================================================================
// Inputs
// =============================================================================

#[tokio::test]
async fn inputs_start_enabled_and_toggle_per_session() {
    let manager = mock();
    let (state, app, session) = setup(&manager);
    let other = seed_session(&state);

    let (status, body) = call(&app, &session, "GET", "/api/inputs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "camera": true, "mic": true }));

    let (_, body) = call(&app, &session, "POST", "/api/inputs/camera/toggle", None).await;
    assert_eq!(body, json!({ "camera": false, "mic": true }));
    let (_, body) = call(&app, &session, "POST", "/api/inputs/mic/toggle", None).await;
    assert_eq!(body, json!({ "camera": false, "mic": false }));

    let (_, body) = call(&app, &other, "GET", "/api/inputs", None).await;
    assert_eq!(body, json!({ "camera": true, "mic": true }));
}

#[tokio::test]
async fn unknown_input_is_400_and_changes_nothing() {
    let manager = mock();
    let (_, app, session) = setup(&manager);

    let (status, _) = call(&app, &session, "POST", "/api/inputs/speaker/toggle", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = call(&app, &session, "GET", "/api/inputs", None).await;
    assert_eq!(body, json!({ "camera": true, "mic": true }));
}

#[tokio::test]
async fn inputs_require_login() {
    let app = app(test_app_state());
    let (status, _, _) = send(&app, request("POST", "/api/inputs/mic/toggle", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
