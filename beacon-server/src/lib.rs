mod gateway;
mod registry;
mod router;

pub use gateway::{AppState, ConnectionGateway, ws_handler};
pub use registry::RoomRegistry;
pub use router::RelayRouter;
