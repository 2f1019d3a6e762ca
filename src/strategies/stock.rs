//! Stock availability strategy. Queries the inventory side of the
//! integrations service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::lookup::{LookupClient, StockInfo};
use crate::nlu::{Entity, EntityLabel};
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus, find_entity};

pub struct StockStrategy {
    lookup: Arc<LookupClient>,
}

impl StockStrategy {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl IntentStrategy for StockStrategy {
    async fn execute(&self, entities: &[Entity]) -> StrategyResult {
        let Some(product_id) = find_entity(entities, EntityLabel::OrderNumber) else {
            return StrategyResult::new(
                StrategyStatus::Error,
                "No se proporcionó un identificador de producto.",
            )
            .with_detail(
                "suggestion",
                "Por favor, indique el producto que desea consultar.",
            );
        };

        debug!(product_id, "querying inventory stock");

        match self.lookup.stock(product_id).await {
            Ok(info) => success_result(&info),
            Err(LookupError::NotFound { .. }) => StrategyResult::new(
                StrategyStatus::Error,
                format!(
                    "No encontramos el producto {product_id} en el inventario. \
                     Verifica el código e intenta nuevamente."
                ),
            )
            .with_detail("product_id", product_id)
            .with_detail("error", "not_found"),
            Err(LookupError::Timeout { .. }) => {
                warn!(product_id, "stock lookup timed out");
                StrategyResult::new(
                    StrategyStatus::Error,
                    "Tiempo de espera agotado al consultar el sistema de inventario.",
                )
                .with_detail("product_id", product_id)
                .with_detail("error", "timeout")
            }
            Err(LookupError::Connection(reason)) => {
                warn!(product_id, reason, "stock lookup connection failed");
                StrategyResult::new(
                    StrategyStatus::Error,
                    "Error al conectar con el sistema de inventario. \
                     Por favor, intente más tarde.",
                )
                .with_detail("product_id", product_id)
                .with_detail("error", "connection_error")
            }
            Err(e) => {
                warn!(product_id, error = %e, "stock lookup failed");
                StrategyResult::new(
                    StrategyStatus::Error,
                    format!("Error al consultar disponibilidad del producto: {e}"),
                )
                .with_detail("product_id", product_id)
                .with_detail("error", e.to_string())
            }
        }
    }
}

fn success_result(info: &StockInfo) -> StrategyResult {
    let message = if info.quantity > 0 {
        format!(
            "¡Buenas noticias! Tenemos {} unidades disponibles del producto {}.",
            info.quantity, info.product_id
        )
    } else {
        format!(
            "Lo sentimos, el producto {} no tiene stock disponible en este momento.",
            info.product_id
        )
    };

    StrategyResult::new(StrategyStatus::Success, message)
        .with_detail("product_id", info.product_id.clone())
        .with_detail("stock_quantity", info.quantity)
        .with_detail("stock_status", info.status.clone())
        .with_detail(
            "last_updated",
            info.last_updated.clone().unwrap_or_default(),
        )
}
