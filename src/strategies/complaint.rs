//! Complaint strategy: acknowledges the issue and hands off to a human.

use async_trait::async_trait;
use serde_json::json;

use crate::nlu::Entity;
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus};

const CONTACT_PHONE: &str = "0800-XXX-XXXX";
const SUPPORT_EMAIL: &str = "soporte@orion.com";

pub struct ComplaintStrategy;

#[async_trait]
impl IntentStrategy for ComplaintStrategy {
    async fn execute(&self, _entities: &[Entity]) -> StrategyResult {
        StrategyResult::new(
            StrategyStatus::Escalated,
            format!(
                "Lamentamos mucho los inconvenientes que estás experimentando. \
                 Un miembro de nuestro equipo se pondrá en contacto contigo pronto \
                 para resolver tu situación. También puedes llamarnos directamente \
                 al {CONTACT_PHONE} para atención inmediata."
            ),
        )
        .with_detail("escalated", true)
        .with_detail("priority", "high")
        .with_detail(
            "contact_options",
            json!([
                format!("Teléfono: {CONTACT_PHONE}"),
                format!("Email: {SUPPORT_EMAIL}"),
                "Un agente te contactará en breve",
            ]),
        )
    }
}
