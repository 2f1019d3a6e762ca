//! Price inquiry strategy. Pricing data is not wired up yet, so this
//! guides the user to the catalog, naming the product when one was
//! extracted.

use async_trait::async_trait;

use crate::nlu::{Entity, EntityLabel};
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus, find_entity};

pub struct PriceStrategy;

#[async_trait]
impl IntentStrategy for PriceStrategy {
    async fn execute(&self, entities: &[Entity]) -> StrategyResult {
        match find_entity(entities, EntityLabel::Product) {
            Some(product) => StrategyResult::new(
                StrategyStatus::Info,
                format!(
                    "Para consultar el precio de '{product}', por favor visita \
                     nuestro catálogo en línea o contacta a ventas."
                ),
            )
            .with_detail("producto", product)
            .with_detail("note", "Esta funcionalidad estará disponible próximamente"),
            None => StrategyResult::new(
                StrategyStatus::Info,
                "Para consultar precios, visita nuestro catálogo en línea \
                 o especifica el producto que te interesa.",
            )
            .with_detail("note", "Necesitamos el nombre o código del producto"),
        }
    }
}
