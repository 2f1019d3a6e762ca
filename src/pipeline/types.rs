//! Wire types exchanged over the HTTP surface.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::nlu::{Entity, Intent};
use crate::strategies::StrategyStatus;

/// Inbound user message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub text: String,
    #[serde(rename = "channel_user_id")]
    pub user_id: String,
}

/// Analysis-only response (`POST /process`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NluResponse {
    pub intent: Intent,
    pub entities: Vec<Entity>,
    pub original_text: String,
    pub channel_user_id: String,
    pub confidence: f32,
    pub normalized_text: String,
}

/// Full pipeline response (`POST /execute`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    pub status: StrategyStatus,
    /// User-facing message from the executed strategy.
    pub action: String,
    pub details: Map<String, Value>,
}
