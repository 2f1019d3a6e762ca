//! Greeting strategy: welcome message listing what the bot can do.

use async_trait::async_trait;
use serde_json::json;

use crate::nlu::Entity;
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus};

pub struct GreetingStrategy;

#[async_trait]
impl IntentStrategy for GreetingStrategy {
    async fn execute(&self, _entities: &[Entity]) -> StrategyResult {
        StrategyResult::new(
            StrategyStatus::Success,
            "¡Hola! Bienvenido a ORION. ¿En qué puedo ayudarte hoy? Puedo ayudarte con:\n\
             • Rastrear pedidos\n\
             • Consultar stock\n\
             • Información de productos",
        )
        .with_detail(
            "available_services",
            json!([
                "Rastreo de pedidos",
                "Consulta de stock",
                "Información general",
            ]),
        )
    }
}
