pub mod products;

use axum::{http::StatusCode, Json};
use chrono::Utc;
use serde_json::json;

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "message": "Product Manager API is running",
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}
