use crate::gateway::ConnectionGateway;
use crate::registry::RoomRegistry;
use beacon_core::{ClientEvent, ConnectionId, RoomId, ServerEvent};
use std::sync::Arc;
use tracing::{debug, info};

/// Decides where each inbound signaling event goes.
///
/// The router is a pure relay: `sdp` and `candidate` payloads pass through
/// untouched. It has no transport of its own, which keeps it testable with
/// plain channels.
#[derive(Clone)]
pub struct RelayRouter {
    registry: Arc<RoomRegistry>,
    gateway: ConnectionGateway,
}

impl RelayRouter {
    pub fn new(registry: Arc<RoomRegistry>, gateway: ConnectionGateway) -> Self {
        Self { registry, gateway }
    }

    pub fn handle_event(&self, from: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::Join { room, user_id } => self.handle_join(from, room, user_id),
            ClientEvent::Offer { room, sdp, target } => {
                self.relay(from, room, target, ServerEvent::Offer { sdp, from });
            }
            ClientEvent::Answer { room, sdp, target } => {
                self.relay(from, room, target, ServerEvent::Answer { sdp, from });
            }
            ClientEvent::IceCandidate {
                room,
                candidate,
                target,
            } => {
                self.relay(from, room, target, ServerEvent::IceCandidate { candidate, from });
            }
        }
    }

    /// Disconnect reconciliation: pull the connection out of every room and
    /// tell the remaining members. Safe to invoke more than once for the
    /// same connection; a second call finds no memberships.
    pub fn handle_disconnect(&self, conn: ConnectionId) {
        for (room, remaining) in self.registry.leave_all(&conn) {
            debug!("{} left room '{}' on disconnect", conn, room);
            let event = ServerEvent::UserLeft {
                connection_id: conn,
            };
            // Notify from the snapshot taken under the registry lock, not a
            // re-read: members joining concurrently get their own view.
            for member in &remaining {
                self.gateway.send(member, &event);
            }
        }
    }

    fn handle_join(&self, from: ConnectionId, room: RoomId, user_id: Option<String>) {
        let participants = self.registry.join(&room, from);
        info!(
            "{} joined room '{}' ({} existing member(s))",
            from,
            room,
            participants.len()
        );

        self.gateway.send(
            &from,
            &ServerEvent::RoomInfo {
                room: room.clone(),
                participants,
            },
        );

        self.gateway.broadcast(
            &room,
            &from,
            &ServerEvent::UserJoined {
                user_id,
                connection_id: from,
            },
        );
    }

    /// Offer/answer/ICE delivery. An explicit target wins over the room:
    /// once two peers know each other's ids they negotiate point-to-point,
    /// avoiding cross-talk in rooms with more than two participants.
    fn relay(
        &self,
        from: ConnectionId,
        room: Option<RoomId>,
        target: Option<ConnectionId>,
        event: ServerEvent,
    ) {
        if let Some(target) = target {
            self.gateway.send(&target, &event);
        } else if let Some(room) = room {
            self.gateway.broadcast(&room, &from, &event);
        } else {
            debug!("Dropping relay event from {} with no room or target", from);
        }
    }
}
