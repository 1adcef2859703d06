//! Integration tests for the HTTP surface
//!
//! These boot the full router, configured exactly as in `main.rs`, and
//! exercise the plain-HTTP endpoints plus the WebSocket route's upgrade
//! requirements.

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use kingside::{middleware::security_headers, routes, state::AppState};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Helper to create a test server with the full app configuration
fn create_test_server() -> TestServer {
    let state = AppState::new();

    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:8000".parse().unwrap(),
            "http://127.0.0.1:8000".parse().unwrap(),
        ])
        .allow_methods([axum::http::Method::GET]);

    let app = axum::Router::new()
        .route("/", axum::routing::get(routes::health::root))
        .route("/health", axum::routing::get(routes::health::health_check))
        .route(
            "/api/session",
            axum::routing::get(routes::health::session_stats),
        )
        .route("/ws", axum::routing::get(routes::websocket::websocket_handler))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(
                    security_headers::security_headers_middleware,
                ))
                .layer(cors),
        );

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let json: Value = serde_json::from_str(&response.text()).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_root_redirects_to_frontend() {
    let server = create_test_server();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_session_stats_shape() {
    let server = create_test_server();

    let response = server.get("/api/session").await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let json: Value = serde_json::from_str(&response.text()).unwrap();
    assert_eq!(json["connections"], 0);
    assert_eq!(json["seats_occupied"], 0);
    assert_eq!(json["first_seat_taken"], false);
    assert_eq!(json["second_seat_taken"], false);
    assert_eq!(json["moves_played"], 0);

    // Fresh session sits at the standard starting position.
    let fen = json["fen"].as_str().unwrap();
    assert!(fen.starts_with("rnbqkbnr/pppppppp/"));
    assert!(fen.contains(" w "));
}

#[tokio::test]
async fn test_ws_route_requires_upgrade() {
    let server = create_test_server();

    // A plain GET with no upgrade headers must not be served as HTTP.
    let response = server.get("/ws").await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = create_test_server();

    let response = server.get("/api/games/create").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers_on_every_response() {
    let server = create_test_server();

    for path in ["/health", "/api/session"] {
        let response = server.get(path).await;

        let frame_options = response
            .iter_headers()
            .find(|(name, _)| *name == header::X_FRAME_OPTIONS)
            .map(|(_, value)| value.to_str().unwrap().to_string());
        assert_eq!(frame_options.as_deref(), Some("DENY"), "missing on {path}");

        let nosniff = response
            .iter_headers()
            .find(|(name, _)| *name == header::X_CONTENT_TYPE_OPTIONS)
            .map(|(_, value)| value.to_str().unwrap().to_string());
        assert_eq!(nosniff.as_deref(), Some("nosniff"), "missing on {path}");

        assert!(
            response
                .iter_headers()
                .any(|(name, _)| *name == header::CONTENT_SECURITY_POLICY),
            "missing CSP on {path}"
        );
    }
}
