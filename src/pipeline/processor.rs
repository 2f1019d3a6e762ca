//! Message orchestrator: NLU → escalation bookkeeping → strategy dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::escalation::EscalationTracker;
use crate::nlu::{NluAnalysis, NluEngine};
use crate::pipeline::types::{DispatchResponse, IncomingMessage, NluResponse};
use crate::strategies::StrategyRegistry;

/// Drives a message through the whole pipeline. One instance serves all
/// users; the NLU stage is pure and the mutable escalation state lives
/// behind its own lock.
pub struct MessageProcessor {
    nlu: NluEngine,
    strategies: StrategyRegistry,
    escalation: Arc<EscalationTracker>,
}

impl MessageProcessor {
    pub fn new(
        nlu: NluEngine,
        strategies: StrategyRegistry,
        escalation: Arc<EscalationTracker>,
    ) -> Self {
        Self {
            nlu,
            strategies,
            escalation,
        }
    }

    /// Analysis only, no side effects.
    pub fn analyze(&self, message: &IncomingMessage) -> NluResponse {
        let analysis = self.nlu.analyze(&message.text);
        Self::to_response(analysis, &message.user_id)
    }

    /// Full pipeline: analyze, track the outcome for escalation, dispatch.
    ///
    /// Total: every message yields a well-formed response, including
    /// unknown intents and lookup failures.
    pub async fn process(&self, message: &IncomingMessage) -> DispatchResponse {
        let analysis = self.nlu.analyze(&message.text);
        info!(
            user = %message.user_id,
            intent = %analysis.intent,
            confidence = analysis.confidence,
            entities = analysis.entities.len(),
            "message analyzed"
        );

        self.escalation
            .observe(&message.user_id, analysis.intent, &message.text)
            .await;

        let result = self
            .strategies
            .dispatch(analysis.intent, &analysis.entities)
            .await;

        let mut details = result.details;
        details.insert(
            "intent".to_string(),
            Value::String(analysis.intent.as_str().to_string()),
        );

        DispatchResponse {
            status: result.status,
            action: result.message,
            details,
        }
    }

    fn to_response(analysis: NluAnalysis, user_id: &str) -> NluResponse {
        NluResponse {
            intent: analysis.intent,
            entities: analysis.entities,
            original_text: analysis.original_text,
            channel_user_id: user_id.to_string(),
            confidence: analysis.confidence,
            normalized_text: analysis.normalized_text,
        }
    }
}
