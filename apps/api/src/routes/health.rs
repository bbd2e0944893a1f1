use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version, model and the
/// provider timeout in effect (null when unbounded).
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "futurework-api",
        "model": MODEL,
        "requestTimeoutSecs": state.config.request_timeout.map(|t| t.as_secs())
    }))
}
