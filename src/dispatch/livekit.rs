//! LiveKit-backed dispatcher using the agent dispatch service client.

use livekit_api::services::agent_dispatch::AgentDispatchClient;
use livekit_protocol as proto;

use super::{AgentDispatcher, DispatchError, DispatchRecord, dispatch_metadata};
use crate::config::LiveKitConfig;

pub struct LiveKitDispatcher {
    client: AgentDispatchClient,
}

impl LiveKitDispatcher {
    #[must_use]
    pub fn new(config: &LiveKitConfig) -> Self {
        let client = AgentDispatchClient::with_api_key(&config.url, &config.api_key, &config.api_secret);
        Self { client }
    }
}

impl std::fmt::Debug for LiveKitDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveKitDispatcher").finish_non_exhaustive()
    }
}

fn to_record(dispatch: proto::AgentDispatch) -> DispatchRecord {
    DispatchRecord {
        id: dispatch.id,
        agent_name: dispatch.agent_name,
        room: dispatch.room,
        metadata: dispatch.metadata,
    }
}

#[async_trait::async_trait]
impl AgentDispatcher for LiveKitDispatcher {
    async fn create_dispatch(&self, room_name: &str, agent_name: &str) -> Result<DispatchRecord, DispatchError> {
        let request = proto::CreateAgentDispatchRequest {
            agent_name: agent_name.to_string(),
            room: room_name.to_string(),
            metadata: dispatch_metadata(agent_name),
            ..Default::default()
        };

        self.client
            .create_dispatch(request)
            .await
            .map(to_record)
            .map_err(|e| DispatchError::Service(e.to_string()))
    }

    async fn list_dispatches(&self, room_name: &str) -> Result<Vec<DispatchRecord>, DispatchError> {
        let dispatches = self
            .client
            .list_dispatch(room_name)
            .await
            .map_err(|e| DispatchError::Service(e.to_string()))?;
        Ok(dispatches.into_iter().map(to_record).collect())
    }
}
