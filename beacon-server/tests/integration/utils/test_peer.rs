use axum::extract::ws::Message;
use beacon_core::{ConnectionId, ServerEvent};
use tokio::sync::mpsc;

/// Capture side of one fake connection.
pub struct TestPeer {
    pub id: ConnectionId,
    rx: mpsc::UnboundedReceiver<Message>,
}

impl TestPeer {
    pub fn new(id: ConnectionId, rx: mpsc::UnboundedReceiver<Message>) -> Self {
        Self { id, rx }
    }

    /// Next event queued for this peer. Delivery in the harness is
    /// synchronous, so an event is either queued already or never coming.
    pub fn recv_event(&mut self) -> ServerEvent {
        match self.try_recv_event() {
            Some(event) => event,
            None => panic!("expected an event for {}, got none", self.id),
        }
    }

    pub fn try_recv_event(&mut self) -> Option<ServerEvent> {
        match self.rx.try_recv() {
            Ok(Message::Text(text)) => {
                Some(serde_json::from_str(&text).expect("invalid server event json"))
            }
            Ok(other) => panic!("unexpected frame for {}: {:?}", self.id, other),
            Err(_) => None,
        }
    }

    pub fn drain(&mut self) -> Vec<ServerEvent> {
        std::iter::from_fn(|| self.try_recv_event()).collect()
    }

    pub fn assert_no_events(&mut self) {
        if let Some(event) = self.try_recv_event() {
            panic!("expected no events for {}, got {:?}", self.id, event);
        }
    }
}
