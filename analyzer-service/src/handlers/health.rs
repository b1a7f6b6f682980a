use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Static liveness endpoint. Reports nothing about upstream or
/// configuration state.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "online", "team": "Syntax Killers" }))
}
