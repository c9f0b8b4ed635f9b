use crate::gateway::ConnectionGateway;
use crate::registry::RoomRegistry;
use crate::router::RelayRouter;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ClientEvent, ConnectionId};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Shared server state: one registry, one gateway, one router.
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub gateway: ConnectionGateway,
    pub router: RelayRouter,
}

impl AppState {
    pub fn new() -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let gateway = ConnectionGateway::new(registry.clone());
        let router = RelayRouter::new(registry.clone(), gateway.clone());
        Self {
            registry,
            gateway,
            router,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // The connection id is assigned here, not supplied by the client.
    let conn = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, conn, state))
}

async fn handle_socket(socket: WebSocket, conn: ConnectionId, state: Arc<AppState>) {
    info!("New signaling connection: {}", conn);

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    state.gateway.register(conn, tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let router = state.router.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => router.handle_event(conn, event),
                        // Trusted intra-app protocol: bad frames are
                        // dropped without a reply.
                        Err(e) => warn!("Dropping malformed frame from {}: {}", conn, e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Exactly one disconnect per socket, after both pumps stopped.
    state.gateway.unregister(&conn);
    state.router.handle_disconnect(conn);
    info!("Signaling connection closed: {}", conn);
}
