//! HTTP surface: analysis, full pipeline, and health endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::pipeline::{DispatchResponse, IncomingMessage, MessageProcessor, NluResponse};

pub fn router(processor: Arc<MessageProcessor>) -> Router {
    Router::new()
        .route("/process", post(process))
        .route("/execute", post(execute))
        .route("/health", get(health))
        .with_state(processor)
}

/// Analysis only: intent, confidence, entities. No state is touched.
async fn process(
    State(processor): State<Arc<MessageProcessor>>,
    Json(message): Json<IncomingMessage>,
) -> Json<NluResponse> {
    Json(processor.analyze(&message))
}

/// Full pipeline: analysis, escalation bookkeeping, strategy dispatch.
async fn execute(
    State(processor): State<Arc<MessageProcessor>>,
    Json(message): Json<IncomingMessage>,
) -> Json<DispatchResponse> {
    Json(processor.process(&message).await)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "orion-bot",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
