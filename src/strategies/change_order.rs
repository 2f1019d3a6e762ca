//! Order modification/cancellation strategy. Changes go through customer
//! service; the bot only routes the user there with the right order id.

use async_trait::async_trait;

use crate::nlu::{Entity, EntityLabel};
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus, find_entity};

const CONTACT_PHONE: &str = "0800-XXX-XXXX";

pub struct ChangeOrderStrategy;

#[async_trait]
impl IntentStrategy for ChangeOrderStrategy {
    async fn execute(&self, entities: &[Entity]) -> StrategyResult {
        let order_id = find_entity(entities, EntityLabel::OrderNumber)
            .or_else(|| find_entity(entities, EntityLabel::TrackingId));

        match order_id {
            Some(order_id) => StrategyResult::new(
                StrategyStatus::Info,
                format!(
                    "Para modificar o cancelar el pedido #{order_id}, comunícate con \
                     nuestro equipo de atención al cliente al {CONTACT_PHONE}. \
                     Las modificaciones dependen del estado actual del envío."
                ),
            )
            .with_detail("pedido_id", order_id)
            .with_detail("contact", CONTACT_PHONE),
            None => StrategyResult::new(
                StrategyStatus::Info,
                "Para modificar o cancelar un pedido, necesitamos tu número de orden. \
                 ¿Podrías proporcionárnoslo?",
            )
            .with_detail("note", "Número de pedido requerido"),
        }
    }
}
