//! Server Startup Tests
//!
//! Tests for server lifecycle, configuration loading, and startup behavior.

use axum::{Router, body::Body, http::Request};
use tower::util::ServiceExt;

use ellen_gateway::{ServerConfig, routes, state::AppState};

/// Helper function to create a minimal test configuration
fn create_minimal_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        google_api_key: None,
        ..Default::default()
    }
}

fn create_app(config: ServerConfig) -> Router {
    let app_state = AppState::new(config);
    Router::new()
        .route(
            "/",
            axum::routing::get(ellen_gateway::handlers::api::health_check),
        )
        .merge(routes::realtime::create_realtime_router())
        .with_state(app_state)
}

/// The server boots and serves the health check without an API key.
#[tokio::test]
async fn test_minimal_config_boot() {
    let config = create_minimal_config();
    assert!(config.validate().is_ok());

    let app = create_app(config);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::OK);
}

/// The relay endpoint requires a WebSocket upgrade.
#[tokio::test]
async fn test_relay_route_rejects_plain_get() {
    let app = create_app(create_minimal_config());

    let request = Request::builder()
        .uri("/ws/realtime")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
}

/// Unknown routes 404.
#[tokio::test]
async fn test_unknown_route() {
    let app = create_app(create_minimal_config());

    let request = Request::builder()
        .uri("/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}
