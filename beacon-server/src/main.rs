use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Json;
use axum::{Router, routing::get};
use serde_json::json;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use beacon_server::{AppState, RoomRegistry, ws_handler};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Initializing signaling relay...");

    let state = Arc::new(AppState::new());
    let registry = state.registry.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/signaling", get(ws_handler))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()
        .context("BIND_ADDR is not a valid socket address")?;
    info!("Signaling relay listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(registry))
        .await
        .context("Server error")?;

    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "connections": state.gateway.connection_count(),
        "rooms": state.registry.room_count(),
    }))
}

/// Sessions are ephemeral: clear-on-stop, clients re-join on reconnect.
async fn shutdown_signal(registry: Arc<RoomRegistry>) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested, clearing room registry");
        registry.clear();
    }
}
