//! Integration tests for the lookup client and the full pipeline.
//!
//! Each test spins up a small Axum app on a random port that mimics the
//! integrations service (inventory + logistics), then exercises the real
//! HTTP contract end to end.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::time::timeout;

use async_trait::async_trait;

use orion_bot::error::LookupError;
use orion_bot::escalation::{EscalationTracker, Notifier};
use orion_bot::lookup::LookupClient;
use orion_bot::nlu::NluEngine;
use orion_bot::pipeline::{IncomingMessage, MessageProcessor};
use orion_bot::strategies::{StrategyRegistry, StrategyStatus};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);

// ── Mock integrations service ────────────────────────────────────────

async fn stock_handler(Path(product_id): Path<String>) -> impl IntoResponse {
    if product_id.contains("99999") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"detail": "Product not found"})),
        );
    }
    let quantity = if product_id.contains("agotado") { 0 } else { 15 };
    (
        StatusCode::OK,
        axum::Json(json!({
            "product_id": product_id,
            "sku": "SKU-001",
            "quantity": quantity,
            "status": if quantity > 0 { "in_stock" } else { "out_of_stock" },
            "last_updated": "2025-10-16T20:30:00Z",
        })),
    )
}

async fn tracking_handler(Path(tracking_id): Path<String>) -> impl IntoResponse {
    if tracking_id.contains("99999") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"detail": "Tracking not found"})),
        );
    }
    if tracking_id.contains("slow") {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    let body = if tracking_id.contains("delivered") {
        json!({
            "tracking_id": tracking_id,
            "order_id": "ORD-1",
            "carrier": "Andreani",
            "status": "delivered",
            "status_label": "Entregado",
            "delivery_confirmation": {
                "delivered_at": "2025-10-16T14:45:00Z",
                "received_by": "Juan Pérez",
            },
            "history": [],
        })
    } else if tracking_id.contains("failed") {
        json!({
            "tracking_id": tracking_id,
            "order_id": "ORD-2",
            "carrier": "Andreani",
            "status": "failed_delivery",
            "status_label": "Entrega fallida",
            "failure_reason": "Destinatario ausente",
            "next_attempt": "2025-10-17T10:00:00Z",
            "history": [],
        })
    } else {
        json!({
            "tracking_id": tracking_id,
            "order_id": "ORD-3",
            "carrier": "Andreani",
            "status": "in_transit",
            "status_label": "En camino",
            "estimated_delivery_date": "2025-10-18T18:00:00Z",
            "current_location": {"city": "Buenos Aires", "state": "CABA", "country": "AR"},
            "history": [
                {
                    "timestamp": "2025-10-15T09:00:00Z",
                    "status": "in_transit",
                    "location": "Hub Buenos Aires",
                    "description": "Paquete en tránsito",
                },
            ],
        })
    };
    (StatusCode::OK, axum::Json(body))
}

/// Start the mock integrations service, return its base URL.
async fn start_integrations() -> String {
    let app = Router::new()
        .route("/stock/{product_id}", get(stock_handler))
        .route("/logistics/tracking/{tracking_id}", get(tracking_handler));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

struct CountingNotifier(std::sync::atomic::AtomicUsize);

#[async_trait]
impl Notifier for CountingNotifier {
    async fn notify(&self, _user: &str, _last: &str, _attempts: u32) -> bool {
        self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        true
    }
}

fn build_processor(base_url: &str) -> (MessageProcessor, Arc<CountingNotifier>) {
    let lookup = Arc::new(LookupClient::new(base_url, LOOKUP_TIMEOUT));
    let notifier = Arc::new(CountingNotifier(std::sync::atomic::AtomicUsize::new(0)));
    let tracker = Arc::new(EscalationTracker::new(2, notifier.clone() as Arc<dyn Notifier>));
    (
        MessageProcessor::new(
            NluEngine::new(),
            StrategyRegistry::with_defaults(lookup),
            tracker,
        ),
        notifier,
    )
}

fn message(user: &str, text: &str) -> IncomingMessage {
    IncomingMessage {
        text: text.to_string(),
        user_id: user.to_string(),
    }
}

// ── Lookup client tests ──────────────────────────────────────────────

#[tokio::test]
async fn stock_lookup_returns_parsed_record() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let client = LookupClient::new(&base, LOOKUP_TIMEOUT);

        let info = client.stock("camiseta-001").await.unwrap();
        assert_eq!(info.product_id, "camiseta-001");
        assert_eq!(info.quantity, 15);
        assert_eq!(info.status, "in_stock");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn stock_lookup_maps_404_to_not_found() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let client = LookupClient::new(&base, LOOKUP_TIMEOUT);

        let err = client.stock("99999").await.unwrap_err();
        assert!(matches!(err, LookupError::NotFound { .. }));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn tracking_lookup_parses_nested_fields() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let client = LookupClient::new(&base, LOOKUP_TIMEOUT);

        let info = client.tracking("TRK-1").await.unwrap();
        assert_eq!(info.status, "in_transit");
        assert_eq!(
            info.current_location.unwrap().city.as_deref(),
            Some("Buenos Aires")
        );
        assert_eq!(info.history.len(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn slow_service_maps_to_timeout() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let client = LookupClient::new(&base, Duration::from_millis(100));

        let err = client.tracking("TRK-slow").await.unwrap_err();
        assert!(matches!(err, LookupError::Timeout { .. }));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_service_maps_to_connection_error() {
    timeout(TEST_TIMEOUT, async {
        // Bind a port, then drop the listener so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = LookupClient::new(format!("http://127.0.0.1:{port}"), LOOKUP_TIMEOUT);
        let err = client.stock("camiseta-001").await.unwrap_err();
        assert!(matches!(err, LookupError::Connection(_)));
    })
    .await
    .expect("test timed out");
}

// ── Full pipeline tests ──────────────────────────────────────────────

#[tokio::test]
async fn tracking_question_yields_delivered_answer() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let (processor, _) = build_processor(&base);

        let response = processor
            .process(&message("u1", "¿Dónde está mi pedido TRK-delivered-123?"))
            .await;

        assert_eq!(response.status, StrategyStatus::Success);
        assert!(response.action.contains("entregado"));
        assert!(response.action.contains("Juan Pérez"));
        assert_eq!(response.details["intent"], "trackear_pedido");
        assert_eq!(response.details["tracking_id"], "TRK-delivered-123");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn failed_delivery_answer_names_reason_and_next_attempt() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let (processor, _) = build_processor(&base);

        let response = processor
            .process(&message("u1", "¿Dónde está mi paquete TRK-failed-9?"))
            .await;

        assert_eq!(response.status, StrategyStatus::Success);
        assert!(response.action.contains("Destinatario ausente"));
        assert!(response.action.contains("2025-10-17"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn in_transit_answer_includes_city_and_estimate() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let (processor, _) = build_processor(&base);

        let response = processor
            .process(&message("u1", "trackear mi pedido TRK-42"))
            .await;

        assert_eq!(response.status, StrategyStatus::Success);
        assert!(response.action.contains("Buenos Aires"));
        assert!(response.action.contains("2025-10-18"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unknown_tracking_id_yields_error_answer() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let (processor, _) = build_processor(&base);

        let response = processor
            .process(&message("u1", "¿Dónde está mi pedido 99999?"))
            .await;

        assert_eq!(response.status, StrategyStatus::Error);
        assert_eq!(response.details["error"], "not_found");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn stock_question_yields_quantity_answer() {
    timeout(TEST_TIMEOUT, async {
        let base = start_integrations().await;
        let (processor, _) = build_processor(&base);

        let response = processor
            .process(&message("u1", "¿Hay stock disponible del producto 12345?"))
            .await;

        assert_eq!(response.status, StrategyStatus::Success);
        assert!(response.action.contains("15 unidades"));
        assert_eq!(response.details["intent"], "consultar_stock");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn greeting_never_touches_the_network() {
    timeout(TEST_TIMEOUT, async {
        // No integrations service at all.
        let (processor, _) = build_processor("http://127.0.0.1:9");

        let response = processor.process(&message("u1", "hola, buenos días")).await;

        assert_eq!(response.status, StrategyStatus::Success);
        assert!(response.action.contains("Bienvenido"));
        assert_eq!(response.details["intent"], "saludo");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn two_gibberish_messages_escalate_once() {
    timeout(TEST_TIMEOUT, async {
        let (processor, notifier) = build_processor("http://127.0.0.1:9");

        processor.process(&message("u1", "xyzzy plugh")).await;
        processor.process(&message("u1", "frobnicate")).await;

        assert_eq!(notifier.0.load(std::sync::atomic::Ordering::SeqCst), 1);

        // A recognized message afterwards starts the user clean.
        processor.process(&message("u1", "gracias")).await;
        processor.process(&message("u1", "zzzz")).await;
        assert_eq!(notifier.0.load(std::sync::atomic::Ordering::SeqCst), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn analyze_reports_intent_without_dispatching() {
    timeout(TEST_TIMEOUT, async {
        // Lookup would fail, but /process-style analysis never calls it.
        let (processor, _) = build_processor("http://127.0.0.1:9");

        let response = processor.analyze(&message("u7", "hay stok del producto 555?"));

        assert_eq!(response.channel_user_id, "u7");
        assert_eq!(response.intent.as_str(), "consultar_stock");
        assert!(response.normalized_text.contains("stock"));
        assert_eq!(response.entities[0].value, "555");
    })
    .await
    .expect("test timed out");
}
