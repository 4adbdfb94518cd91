//! Health check endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Liveness probe; returns a static status payload.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "message": "Ellen API is running" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_payload() {
        let Json(body) = health_check().await;
        assert_eq!(body["message"], "Ellen API is running");
    }
}
