//! Thanks/goodbye strategy: polite closing message.

use async_trait::async_trait;

use crate::nlu::Entity;
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus};

pub struct ThanksStrategy;

#[async_trait]
impl IntentStrategy for ThanksStrategy {
    async fn execute(&self, _entities: &[Entity]) -> StrategyResult {
        StrategyResult::new(
            StrategyStatus::Success,
            "¡De nada! Fue un placer ayudarte. Si necesitas algo más, \
             no dudes en escribirnos. ¡Que tengas un excelente día!",
        )
        .with_detail("conversation_ended", true)
    }
}
