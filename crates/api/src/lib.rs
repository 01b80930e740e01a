//! Oqim gateway HTTP server library.
//!
//! Exposes the building blocks (config, state, error handling, intake,
//! routes, WebSocket progress channel) so integration tests and the binary
//! entrypoint both use the same stack.

pub mod config;
pub mod error;
pub mod intake;
pub mod progress;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
