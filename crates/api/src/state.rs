use std::sync::Arc;

use tokio::sync::mpsc;

use oqim_core::ProgressEvent;
use oqim_jobs::JobRunner;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection registry (progress channel clients).
    pub ws_manager: Arc<WsManager>,
    /// Job runner holding the shared backend capabilities.
    pub runner: Arc<JobRunner>,
    /// Sender half of the progress channel; handlers hand clones to
    /// [`oqim_jobs::ProgressReporter`]s.
    pub progress_tx: mpsc::UnboundedSender<ProgressEvent>,
}
