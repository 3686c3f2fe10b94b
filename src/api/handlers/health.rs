use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Backend is running" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
