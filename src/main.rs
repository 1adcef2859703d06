use anyhow::Context;
use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use kingside::{
    middleware::security_headers,
    routes::{health, websocket},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A .env file is optional.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kingside=info,tower_http=warn".into()),
        )
        .init();

    println!("♞ Kingside chess server starting...");

    // One session for the process lifetime; no reset, no second game.
    let state = AppState::new();

    let cors = CorsLayer::new()
        .allow_origin([
            "http://localhost:8000".parse().unwrap(),
            "http://127.0.0.1:8000".parse().unwrap(),
        ])
        .allow_methods([axum::http::Method::GET]);

    let app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/api/session", get(health::session_stats))
        // WebSocket
        .route("/ws", get(websocket::websocket_handler))
        // Static files (the frontend, when one is deployed alongside)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(
                    security_headers::security_headers_middleware,
                ))
                .layer(cors),
        );

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    println!("✅ Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
