use crate::registry::RoomRegistry;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, RoomId, ServerEvent};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Tracks open sockets and delivers outbound events to them.
///
/// Delivery is best-effort: a target that disconnected concurrently is
/// logged and skipped, never reported back to the sender. Events are pushed
/// onto per-connection unbounded channels, so a slow socket cannot stall
/// the caller.
#[derive(Clone)]
pub struct ConnectionGateway {
    sockets: Arc<DashMap<ConnectionId, mpsc::UnboundedSender<Message>>>,
    registry: Arc<RoomRegistry>,
}

impl ConnectionGateway {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self {
            sockets: Arc::new(DashMap::new()),
            registry,
        }
    }

    pub fn register(&self, conn: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.sockets.insert(conn, tx);
    }

    pub fn unregister(&self, conn: &ConnectionId) {
        self.sockets.remove(conn);
    }

    pub fn connection_count(&self) -> usize {
        self.sockets.len()
    }

    /// Deliver one event to one connection, best-effort.
    pub fn send(&self, conn: &ConnectionId, event: &ServerEvent) {
        match serde_json::to_string(event) {
            Ok(json) => self.send_raw(conn, json),
            Err(e) => error!("Failed to serialize server event: {}", e),
        }
    }

    /// Deliver one event to every current member of a room except
    /// `exclude`. The membership snapshot is taken fresh from the registry;
    /// delivery happens outside the registry lock.
    pub fn broadcast(&self, room: &RoomId, exclude: &ConnectionId, event: &ServerEvent) {
        let members = self.registry.members(room);

        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize server event: {}", e);
                return;
            }
        };

        for member in members.iter().filter(|m| *m != exclude) {
            self.send_raw(member, json.clone());
        }
    }

    fn send_raw(&self, conn: &ConnectionId, json: String) {
        let Some(tx) = self.sockets.get(conn) else {
            debug!("Dropping event for unknown connection {}", conn);
            return;
        };
        if tx.send(Message::Text(json.into())).is_err() {
            debug!("Connection {} closed mid-delivery", conn);
        }
    }
}
