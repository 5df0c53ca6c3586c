use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Never authenticated.
pub async fn handle_healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}
