//! Intent strategies: one business-logic handler per recognized intent.
//!
//! The registry is a static mapping from the closed `Intent` enum to trait
//! objects, resolved at startup. Dispatching an intent with no registered
//! strategy is a reporting response (lists the registered intents), not a
//! fault.

pub mod change_order;
pub mod complaint;
pub mod greeting;
pub mod price;
pub mod stock;
pub mod thanks;
pub mod track_order;

pub use change_order::ChangeOrderStrategy;
pub use complaint::ComplaintStrategy;
pub use greeting::GreetingStrategy;
pub use price::PriceStrategy;
pub use stock::StockStrategy;
pub use thanks::ThanksStrategy;
pub use track_order::TrackOrderStrategy;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::lookup::LookupClient;
use crate::nlu::{Entity, EntityLabel, Intent};

/// Outcome category for a strategy execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Success,
    Info,
    Error,
    Escalated,
}

/// Uniform result shape produced by every strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyResult {
    pub status: StrategyStatus,
    /// User-facing message.
    pub message: String,
    /// Structured payload; the orchestrator merges `intent` in.
    pub details: Map<String, Value>,
}

impl StrategyResult {
    pub fn new(status: StrategyStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Map::new(),
        }
    }

    /// Attach one detail entry.
    pub fn with_detail(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Business logic for one intent.
#[async_trait]
pub trait IntentStrategy: Send + Sync {
    /// Execute against the entities extracted from the message.
    /// Never fails: upstream errors are converted into `error`-status
    /// results with a human-readable message.
    async fn execute(&self, entities: &[Entity]) -> StrategyResult;
}

/// First entity value carrying the given label, if any.
pub(crate) fn find_entity<'a>(entities: &'a [Entity], label: EntityLabel) -> Option<&'a str> {
    entities
        .iter()
        .find(|e| e.label == label)
        .map(|e| e.value.as_str())
}

/// Static intent → strategy mapping.
pub struct StrategyRegistry {
    strategies: HashMap<Intent, Arc<dyn IntentStrategy>>,
}

impl StrategyRegistry {
    /// Empty registry (for tests).
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registry with all seven production strategies.
    pub fn with_defaults(lookup: Arc<LookupClient>) -> Self {
        let mut registry = Self::empty();
        registry.register(
            Intent::TrackOrder,
            Arc::new(TrackOrderStrategy::new(Arc::clone(&lookup))),
        );
        registry.register(Intent::CheckStock, Arc::new(StockStrategy::new(lookup)));
        registry.register(Intent::CheckPrice, Arc::new(PriceStrategy));
        registry.register(Intent::ChangeOrder, Arc::new(ChangeOrderStrategy));
        registry.register(Intent::Complaint, Arc::new(ComplaintStrategy));
        registry.register(Intent::Greeting, Arc::new(GreetingStrategy));
        registry.register(Intent::Thanks, Arc::new(ThanksStrategy));
        registry
    }

    pub fn register(&mut self, intent: Intent, strategy: Arc<dyn IntentStrategy>) {
        self.strategies.insert(intent, strategy);
    }

    /// Wire names of all registered intents, sorted for determinism.
    pub fn registered_intents(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> =
            self.strategies.keys().map(|i| i.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Execute the strategy registered for `intent`.
    ///
    /// Unknown or unregistered intents produce a deterministic `error`
    /// result listing the registered intent names.
    pub async fn dispatch(&self, intent: Intent, entities: &[Entity]) -> StrategyResult {
        match self.strategies.get(&intent) {
            Some(strategy) => strategy.execute(entities).await,
            None => {
                warn!(intent = %intent, "no strategy registered for intent");
                StrategyResult::new(
                    StrategyStatus::Error,
                    format!("Intent '{intent}' no tiene estrategia asociada"),
                )
                .with_detail(
                    "available_intents",
                    Value::Array(
                        self.registered_intents()
                            .into_iter()
                            .map(|n| Value::String(n.to_string()))
                            .collect(),
                    ),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn registry() -> StrategyRegistry {
        // Lookup client points nowhere; the network-backed strategies are
        // not executed in these tests.
        let lookup = Arc::new(LookupClient::new(
            "http://127.0.0.1:9",
            Duration::from_millis(100),
        ));
        StrategyRegistry::with_defaults(lookup)
    }

    #[tokio::test]
    async fn unknown_intent_reports_available_strategies() {
        let result = registry().dispatch(Intent::Unknown, &[]).await;

        assert_eq!(result.status, StrategyStatus::Error);
        let available = result.details["available_intents"].as_array().unwrap();
        assert_eq!(available.len(), 7);
        for name in [
            "trackear_pedido",
            "consultar_stock",
            "consultar_precio",
            "cambiar_pedido",
            "queja_reclamo",
            "saludo",
            "agradecimiento",
        ] {
            assert!(available.iter().any(|v| v == name), "missing {name}");
        }
    }

    #[tokio::test]
    async fn empty_registry_rejects_everything() {
        let registry = StrategyRegistry::empty();
        let result = registry.dispatch(Intent::Greeting, &[]).await;
        assert_eq!(result.status, StrategyStatus::Error);
        assert!(
            result.details["available_intents"]
                .as_array()
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn registered_strategy_is_invoked() {
        let result = registry().dispatch(Intent::Greeting, &[]).await;
        assert_eq!(result.status, StrategyStatus::Success);
    }

    #[test]
    fn find_entity_returns_first_match() {
        let entities = vec![
            Entity::new(EntityLabel::Product, "ABC"),
            Entity::new(EntityLabel::OrderNumber, "111"),
            Entity::new(EntityLabel::OrderNumber, "222"),
        ];
        assert_eq!(find_entity(&entities, EntityLabel::OrderNumber), Some("111"));
        assert_eq!(find_entity(&entities, EntityLabel::TrackingId), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(StrategyStatus::Escalated).unwrap(),
            "escalated"
        );
    }
}
