//! Outbound commands for the real-time media layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::CallMediaType;

/// One ICE endpoint descriptor handed to the media layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceServer {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServer {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            username: None,
            credential: None,
        }
    }
}

/// Command issued to the signaling transport.
///
/// Serializes to the tagged JSON shape the media layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CallCommand {
    /// Begin media negotiation for the newly accepted session.
    #[serde(rename_all = "camelCase")]
    Start {
        media: CallMediaType,
        #[serde(skip_serializing_if = "Option::is_none")]
        shared_key: Option<String>,
        ice_servers: Vec<IceServer>,
        relay: bool,
    },
    /// Tear down the active media session.
    End,
}

/// Abstract channel carrying call commands to the media layer.
///
/// Acknowledgement is out of band: the coordinator updates its own state
/// optimistically after issuing a command and relies on a separate
/// termination signal to reach the terminal state.
#[async_trait]
pub trait SignalingTransport: Send + Sync {
    async fn send(&self, command: CallCommand);
}
