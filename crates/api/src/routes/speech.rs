//! Text-to-speech endpoint: JSON in, audio attachment out.

use axum::extract::State;
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use oqim_core::JobKind;
use oqim_jobs::{JobOutput, JobRequest, ProgressReporter};

use crate::error::{AppError, AppResult};
use crate::response::file_attachment;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/text-to-speech", post(text_to_speech))
}

#[derive(Debug, Deserialize)]
struct TtsRequest {
    #[serde(default)]
    text: String,
    #[serde(default = "default_language")]
    language: String,
    client_id: Option<String>,
}

fn default_language() -> String {
    "uz".into()
}

/// POST /api/text-to-speech
///
/// Synthesizes `text` in `language` and streams the audio back as an
/// attachment named `tts_<language>.mp3`.
async fn text_to_speech(
    State(state): State<AppState>,
    Json(request): Json<TtsRequest>,
) -> AppResult<Response> {
    if request.text.is_empty() {
        return Err(AppError::invalid("No text provided"));
    }

    let reporter = ProgressReporter::new(
        JobKind::TextToSpeech,
        request.client_id.clone(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(
            JobRequest::TextToSpeech {
                text: request.text,
                language: request.language,
            },
            &reporter,
        )
        .await?;

    match output {
        JobOutput::File {
            path,
            content_type,
            download_name,
        } => file_attachment(&path, content_type, &download_name).await,
        JobOutput::Json(_) => Err(AppError::InternalError(
            "Synthesis job produced JSON instead of a file".into(),
        )),
    }
}
