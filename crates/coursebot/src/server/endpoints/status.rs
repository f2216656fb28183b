use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// GET /
/// Liveness text for the hosting platform's health check
pub async fn get_root() -> &'static str {
    "✅ Discord Bot 正在運作中！"
}

/// GET /health
pub async fn get_health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}
