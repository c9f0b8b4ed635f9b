use crate::model::connection::ConnectionId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound signaling events, tagged by `event`.
///
/// `sdp` and `candidate` are opaque payloads: the relay forwards them
/// verbatim and never inspects them. `target` switches a relay event from
/// room broadcast to point-to-point delivery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    Join {
        room: RoomId,
        #[serde(default)]
        user_id: Option<String>,
    },
    Offer {
        #[serde(default)]
        room: Option<RoomId>,
        sdp: Value,
        #[serde(default)]
        target: Option<ConnectionId>,
    },
    Answer {
        #[serde(default)]
        room: Option<RoomId>,
        sdp: Value,
        #[serde(default)]
        target: Option<ConnectionId>,
    },
    IceCandidate {
        #[serde(default)]
        room: Option<RoomId>,
        candidate: Value,
        #[serde(default)]
        target: Option<ConnectionId>,
    },
}

/// Outbound signaling events, mirrored from the reference protocol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Membership snapshot sent to a joiner; never includes the joiner.
    RoomInfo {
        room: RoomId,
        participants: Vec<ConnectionId>,
    },
    UserJoined {
        user_id: Option<String>,
        connection_id: ConnectionId,
    },
    Offer {
        sdp: Value,
        from: ConnectionId,
    },
    Answer {
        sdp: Value,
        from: ConnectionId,
    },
    IceCandidate {
        candidate: Value,
        from: ConnectionId,
    },
    UserLeft {
        connection_id: ConnectionId,
    },
}
