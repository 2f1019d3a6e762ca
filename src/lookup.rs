//! HTTP client for the integrations service (inventory + logistics).
//!
//! The service is an opaque collaborator: one attempt per call, no
//! retries, a fixed per-request timeout, and every failure mode mapped to
//! a `LookupError` variant so strategies can answer the user instead of
//! failing the pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::LookupError;

/// Default per-request timeout for lookup calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Stock record for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockInfo {
    pub product_id: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: i64,
    pub status: String,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Shipment tracking record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingInfo {
    pub tracking_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub carrier: Option<String>,
    pub status: String,
    #[serde(default)]
    pub status_label: Option<String>,
    #[serde(default)]
    pub estimated_delivery_date: Option<String>,
    #[serde(default)]
    pub current_location: Option<Location>,
    #[serde(default)]
    pub delivery_confirmation: Option<DeliveryConfirmation>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub next_attempt: Option<String>,
    #[serde(default)]
    pub history: Vec<Movement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfirmation {
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub received_by: Option<String>,
}

/// One entry in a shipment's movement history, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Client for the integrations service.
pub struct LookupClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl LookupClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            timeout,
        }
    }

    /// `GET /stock/{product_id}`.
    pub async fn stock(&self, product_id: &str) -> Result<StockInfo, LookupError> {
        let url = format!("{}/stock/{}", self.base_url, product_id);
        self.get_json(&url, product_id).await
    }

    /// `GET /logistics/tracking/{tracking_id}`.
    pub async fn tracking(&self, tracking_id: &str) -> Result<TrackingInfo, LookupError> {
        let url = format!("{}/logistics/tracking/{}", self.base_url, tracking_id);
        self.get_json(&url, tracking_id).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, id: &str) -> Result<T, LookupError> {
        debug!(url, "calling integrations service");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout { id: id.to_string() }
                } else {
                    LookupError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))
    }
}
