// handlers/public/mod.rs - Public liveness endpoints (no credentials)

use axum::response::Json;
use serde_json::{json, Value};

/// GET / - static liveness string for uptime checkers
pub async fn root() -> &'static str {
    "Track PMS API running"
}

/// GET /health - JSON health document
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
