//! Order tracking strategy. Queries the logistics side of the
//! integrations service and phrases the answer by shipment status.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::lookup::{LookupClient, TrackingInfo};
use crate::nlu::{Entity, EntityLabel};
use crate::strategies::{IntentStrategy, StrategyResult, StrategyStatus, find_entity};

pub struct TrackOrderStrategy {
    lookup: Arc<LookupClient>,
}

impl TrackOrderStrategy {
    pub fn new(lookup: Arc<LookupClient>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl IntentStrategy for TrackOrderStrategy {
    async fn execute(&self, entities: &[Entity]) -> StrategyResult {
        // Prefer a prefixed tracking id; fall back to a bare order number.
        let id = find_entity(entities, EntityLabel::TrackingId)
            .or_else(|| find_entity(entities, EntityLabel::OrderNumber));

        let Some(id) = id else {
            return StrategyResult::new(
                StrategyStatus::Error,
                "No pude identificar el número de pedido en tu consulta. \
                 Por favor, proporciona un número de seguimiento válido.",
            )
            .with_detail("missing_entity", "numero_pedido");
        };

        debug!(tracking_id = id, "querying logistics tracking");

        match self.lookup.tracking(id).await {
            Ok(info) => success_result(id, &info),
            Err(LookupError::NotFound { .. }) => StrategyResult::new(
                StrategyStatus::Error,
                "No pudimos encontrar información para ese número de seguimiento. \
                 Por favor, verifica que sea correcto o contacta al remitente.",
            )
            .with_detail("tracking_id", id)
            .with_detail("error", "not_found"),
            Err(LookupError::Timeout { .. }) => {
                warn!(tracking_id = id, "tracking lookup timed out");
                StrategyResult::new(
                    StrategyStatus::Error,
                    "La consulta de seguimiento tardó demasiado. \
                     Por favor, intenta nuevamente en unos momentos.",
                )
                .with_detail("tracking_id", id)
                .with_detail("error", "timeout")
            }
            Err(LookupError::Connection(reason)) => {
                warn!(tracking_id = id, reason, "tracking lookup connection failed");
                StrategyResult::new(
                    StrategyStatus::Error,
                    "No pudimos conectar con el servicio de seguimiento. \
                     Por favor, intenta más tarde.",
                )
                .with_detail("tracking_id", id)
                .with_detail("error", "connection_error")
            }
            Err(e) => {
                warn!(tracking_id = id, error = %e, "tracking lookup failed");
                StrategyResult::new(
                    StrategyStatus::Error,
                    format!("Error al consultar el seguimiento del pedido: {e}"),
                )
                .with_detail("tracking_id", id)
                .with_detail("error", e.to_string())
            }
        }
    }
}

/// Shape a found shipment into a user-facing result.
fn success_result(id: &str, info: &TrackingInfo) -> StrategyResult {
    let message = status_message(info);

    let last_movement = info
        .history
        .first()
        .map(|m| {
            format!(
                "{} - {}",
                m.description.as_deref().unwrap_or("N/A"),
                m.location.as_deref().unwrap_or("N/A"),
            )
        })
        .unwrap_or_else(|| "Sin información de movimientos".to_string());

    StrategyResult::new(StrategyStatus::Success, message)
        .with_detail("tracking_id", id)
        .with_detail(
            "carrier",
            info.carrier.clone().unwrap_or_else(|| "transportista".to_string()),
        )
        .with_detail("status", info.status.clone())
        .with_detail(
            "status_label",
            info.status_label.clone().unwrap_or_else(|| "desconocido".to_string()),
        )
        .with_detail(
            "estimated_delivery",
            info.estimated_delivery_date
                .clone()
                .unwrap_or_else(|| "fecha no disponible".to_string()),
        )
        .with_detail(
            "current_location",
            serde_json::to_value(&info.current_location).unwrap_or(Value::Null),
        )
        .with_detail("last_movement", last_movement)
        .with_detail(
            "history",
            serde_json::to_value(&info.history).unwrap_or(Value::Null),
        )
}

/// Pick the message template by shipment status.
fn status_message(info: &TrackingInfo) -> String {
    match info.status.as_str() {
        "delivered" => {
            let confirmation = info.delivery_confirmation.as_ref();
            let received_by = confirmation
                .and_then(|c| c.received_by.as_deref())
                .unwrap_or("destinatario");
            let delivered_at = confirmation
                .and_then(|c| c.delivered_at.as_deref())
                .map(date_prefix)
                .unwrap_or_default();
            format!(
                "¡Buenas noticias! Tu pedido ya fue entregado. \
                 Recibido por {received_by} el {delivered_at}."
            )
        }
        "failed_delivery" => {
            let reason = info.failure_reason.as_deref().unwrap_or("motivo desconocido");
            let next_attempt = info
                .next_attempt
                .as_deref()
                .map(date_prefix)
                .unwrap_or_else(|| "próximamente".to_string());
            format!(
                "Hubo un intento de entrega fallido ({reason}). \
                 El próximo intento será el {next_attempt}."
            )
        }
        _ => {
            let status_label = info.status_label.as_deref().unwrap_or("desconocido");
            let city = info
                .current_location
                .as_ref()
                .and_then(|l| l.city.as_deref())
                .unwrap_or("ubicación desconocida");
            let estimated = info
                .estimated_delivery_date
                .as_deref()
                .map(date_prefix)
                .unwrap_or_else(|| "fecha no disponible".to_string());
            format!(
                "Tu pedido está '{status_label}'. Se encuentra en {city} \
                 y la fecha estimada de entrega es {estimated}."
            )
        }
    }
}

/// Date portion of an ISO 8601 timestamp (`2025-10-16T...` → `2025-10-16`).
fn date_prefix(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}
