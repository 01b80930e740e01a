use serde::Serialize;

use crate::types::JobKind;

/// A progress update for one job, pushed to connected WebSocket clients.
///
/// Ephemeral and delivered at-most-once, best-effort. The wire shape is
/// `{"type":"progress","task":...,"progress":...,"message":...}`; the
/// `target` field is routing metadata only and never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    /// Job kind, serialized as the legacy `task` string.
    #[serde(rename = "task")]
    pub kind: JobKind,

    /// Percentage in 0–100, non-decreasing within one job.
    pub progress: u8,

    /// Human-readable status line.
    pub message: String,

    /// Connection id of the submitting client, when known. `None` means
    /// the event is broadcast to every connection (single-client fallback).
    #[serde(skip)]
    pub target: Option<String>,
}

impl ProgressEvent {
    pub fn new(kind: JobKind, progress: u8, message: impl Into<String>) -> Self {
        Self {
            kind,
            progress,
            message: message.into(),
            target: None,
        }
    }

    /// Address the event to a single connection instead of broadcasting.
    pub fn with_target(mut self, conn_id: impl Into<String>) -> Self {
        self.target = Some(conn_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_legacy_wire_fields() {
        let event = ProgressEvent::new(JobKind::VideoToText, 40, "Transcribing")
            .with_target("conn-1");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["task"], "video_to_text");
        assert_eq!(json["progress"], 40);
        assert_eq!(json["message"], "Transcribing");
        // Routing metadata must not leak onto the wire.
        assert!(json.get("target").is_none());
    }
}
