//! Dispatch service — create an agent dispatch and report the room's total.

use serde::Serialize;

use crate::dispatch::{AgentDispatcher, DispatchError, DispatchRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchOutcome {
    pub dispatch: DispatchRecord,
    pub dispatch_count: usize,
}

/// Dispatch `agent_name` into `room_name`, then count the room's dispatches.
///
/// # Errors
///
/// Returns [`DispatchError::NotConfigured`] when no dispatcher is available,
/// or the dispatcher's error for either call.
pub async fn dispatch_agent(
    dispatcher: Option<&dyn AgentDispatcher>,
    room_name: &str,
    agent_name: &str,
) -> Result<DispatchOutcome, DispatchError> {
    let dispatcher = dispatcher.ok_or(DispatchError::NotConfigured)?;

    let dispatch = dispatcher.create_dispatch(room_name, agent_name).await?;
    let dispatch_count = dispatcher.list_dispatches(room_name).await?.len();

    tracing::info!(room = %room_name, agent = %agent_name, dispatch_id = %dispatch.id, dispatch_count, "agent dispatched");
    Ok(DispatchOutcome { dispatch, dispatch_count })
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod tests;
