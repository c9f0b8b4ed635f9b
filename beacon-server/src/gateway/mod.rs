mod connection_gateway;
mod ws_handler;

pub use connection_gateway::*;
pub use ws_handler::*;
