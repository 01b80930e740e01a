//! Forwarder task between the job runners and the WebSocket registry.
//!
//! Runners publish [`ProgressEvent`]s on an unbounded channel so reporting
//! never blocks backend execution; this task drains that channel and
//! routes each event to the submitting client's connection, or broadcasts
//! when no target is known (single-client fallback).

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::mpsc;

use oqim_core::ProgressEvent;

use crate::ws::WsManager;

/// Spawn the progress forwarding loop.
///
/// Exits when every sender half of the channel is dropped.
pub fn spawn_progress_forwarder(
    ws_manager: Arc<WsManager>,
    mut rx: mpsc::UnboundedReceiver<ProgressEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let message = match wire_frame(&event) {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize progress event");
                    continue;
                }
            };

            match &event.target {
                Some(conn_id) => {
                    // Best-effort: the client may already be gone.
                    if !ws_manager.send_to(conn_id, message).await {
                        tracing::debug!(
                            conn_id = %conn_id,
                            task = %event.kind,
                            "Target connection gone, dropping progress event",
                        );
                    }
                }
                None => ws_manager.broadcast(message).await,
            }
        }
        tracing::info!("Progress channel closed, forwarder stopping");
    })
}

/// Serialize an event into the wire frame
/// `{"type":"progress","task":...,"progress":...,"message":...}`.
fn wire_frame(event: &ProgressEvent) -> Result<Message, serde_json::Error> {
    let mut value = serde_json::to_value(event)?;
    value["type"] = serde_json::Value::String("progress".into());
    Ok(Message::Text(value.to_string().into()))
}
