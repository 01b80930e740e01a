//! WebSocket progress channel.
//!
//! Provides the connection registry, heartbeat monitoring, and the HTTP
//! upgrade handler. Progress events produced by running jobs are routed
//! here by the forwarder task in [`crate::progress`].

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
