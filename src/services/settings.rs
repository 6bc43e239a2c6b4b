//! Settings service — synchronizes the speed/emotion editor on close.
//!
//! DESIGN
//! ======
//! Closing computes the update payload under the playground lock, releases
//! the lock for the PUT, then re-acquires it to adopt the manager's reply.
//! At most one PUT is sent per close, and only when the draft differs from
//! the last synced snapshot.
//!
//! TRADE-OFFS
//! ==========
//! A failed PUT leaves both draft and snapshot untouched. The difference is
//! still there on the next close, which retries implicitly. No rollback.

use serde::Serialize;

use crate::manager::{ManagerError, SpeedEmotionResult};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Nothing differed; no request was sent.
    Unchanged,
    /// The manager accepted the update.
    Synced { result: SpeedEmotionResult },
    /// The update was attempted and failed; snapshot unchanged.
    Failed { error: String },
}

/// Close `session_id`'s editor and push the draft if it changed.
pub async fn close_and_sync(state: &AppState, session_id: &str) -> SyncOutcome {
    let update = {
        let mut playgrounds = state.playgrounds.write().await;
        playgrounds
            .entry(session_id.to_owned())
            .or_default()
            .speed_emotion
            .close()
    };

    let Some(update) = update else {
        return SyncOutcome::Unchanged;
    };

    let sent = match &state.manager {
        Some(manager) => manager.update_speed_emotion(&update).await,
        None => Err(ManagerError::NotConfigured),
    };

    match sent {
        Ok(result) => {
            let mut playgrounds = state.playgrounds.write().await;
            if let Some(playground) = playgrounds.get_mut(session_id) {
                playground.speed_emotion.apply_synced(&result);
            }
            tracing::info!(
                speed = %result.now_voice_speed,
                emotion = %result.now_voice_emotion,
                "speed/emotion synced"
            );
            SyncOutcome::Synced { result }
        }
        Err(e) => {
            tracing::error!(error = %e, speed = %update.voice_speed, "speed/emotion update failed");
            SyncOutcome::Failed { error: e.to_string() }
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
