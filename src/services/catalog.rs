//! Catalog service — loads the assistant and voice lists into a session's pickers.
//!
//! DESIGN
//! ======
//! A refresh is the one listing fetch a picker makes when it mounts. The
//! fetch runs without holding the playground lock; the result is then loaded
//! into the selector, which applies the default-selection policy. Failures
//! are logged and leave the list empty. No retry.

use crate::manager::{Assistant, ManagerError, Voice};
use crate::playground::Playground;
use crate::playground::selector::{ListSelector, Selectable};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome<T> {
    pub items: Vec<T>,
    /// Item auto-selected by this load, for parent notification.
    pub auto_selected: Option<T>,
    pub selected: Option<T>,
    /// Set when the fetch failed and the list was cleared.
    pub error: Option<String>,
}

/// Fetch the assistant list for `session_id`'s picker.
pub async fn refresh_assistants(state: &AppState, session_id: &str) -> RefreshOutcome<Assistant> {
    let fetched = match &state.manager {
        Some(manager) => manager.list_assistants().await,
        None => Err(ManagerError::NotConfigured),
    };
    store(state, session_id, "assistants", fetched, |p| &mut p.assistants).await
}

/// Fetch the voice list for `session_id`'s picker.
pub async fn refresh_voices(state: &AppState, session_id: &str) -> RefreshOutcome<Voice> {
    let fetched = match &state.manager {
        Some(manager) => manager.list_voices().await,
        None => Err(ManagerError::NotConfigured),
    };
    store(state, session_id, "voices", fetched, |p| &mut p.voices).await
}

async fn store<T, F>(
    state: &AppState,
    session_id: &str,
    what: &'static str,
    fetched: Result<Vec<T>, ManagerError>,
    picker: F,
) -> RefreshOutcome<T>
where
    T: Selectable,
    F: FnOnce(&mut Playground) -> &mut ListSelector<T>,
{
    let mut playgrounds = state.playgrounds.write().await;
    let selector = picker(playgrounds.entry(session_id.to_owned()).or_default());

    match fetched {
        Ok(items) => {
            let count = items.len();
            let auto_selected = selector.load(items).cloned();
            tracing::debug!(what, count, auto_selected = auto_selected.is_some(), "catalog loaded");
            RefreshOutcome {
                items: selector.items().to_vec(),
                auto_selected,
                selected: selector.selected().cloned(),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(what, error = %e, "catalog fetch failed");
            selector.clear();
            RefreshOutcome {
                items: Vec::new(),
                auto_selected: None,
                selected: selector.selected().cloned(),
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
