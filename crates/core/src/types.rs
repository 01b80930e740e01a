use serde::{Deserialize, Serialize};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The fixed set of backend-processing tasks the gateway can dispatch.
///
/// Each kind maps to exactly one backend capability; dispatch is always by
/// kind, never by inspecting the payload shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    VideoToText,
    AudioToText,
    DocumentAnalysis,
    UzbekLlm,
    TextToSpeech,
    SteganographyEncode,
    SteganographyDecode,
}

impl JobKind {
    /// Wire name used in progress events, matching the legacy `task` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::VideoToText => "video_to_text",
            JobKind::AudioToText => "audio_to_text",
            JobKind::DocumentAnalysis => "document_analysis",
            JobKind::UzbekLlm => "uzbek_llm",
            JobKind::TextToSpeech => "text_to_speech",
            JobKind::SteganographyEncode => "steganography_encode",
            JobKind::SteganographyDecode => "steganography_decode",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a dispatched job. The terminal state is reached exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
}

/// One backend invocation triggered by a request.
///
/// Jobs are ephemeral, in-memory only; they are not persisted across
/// process restarts (deliberate limitation, see DESIGN.md).
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    /// Correlation id generated at dispatch time.
    pub id: uuid::Uuid,
    pub kind: JobKind,
    pub status: JobStatus,
    /// Fractional progress, 0–100, non-decreasing while running.
    pub progress: u8,
    /// Last human-readable status message reported by the runner.
    pub last_message: String,
    pub started_at: Timestamp,
}

impl Job {
    /// Create a pending job of the given kind with a fresh correlation id.
    pub fn new(kind: JobKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            kind,
            status: JobStatus::Pending,
            progress: 0,
            last_message: String::new(),
            started_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_kind_wire_names_are_snake_case() {
        assert_eq!(JobKind::VideoToText.as_str(), "video_to_text");
        assert_eq!(JobKind::UzbekLlm.as_str(), "uzbek_llm");
        assert_eq!(JobKind::SteganographyDecode.as_str(), "steganography_decode");
    }

    #[test]
    fn job_kind_serializes_to_wire_name() {
        let json = serde_json::to_string(&JobKind::TextToSpeech).unwrap();
        assert_eq!(json, "\"text_to_speech\"");
    }

    #[test]
    fn new_job_starts_pending_at_zero() {
        let job = Job::new(JobKind::AudioToText);
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, 0);
        assert!(job.last_message.is_empty());
    }
}
