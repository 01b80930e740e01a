//! Video and audio transcription endpoints.
//!
//! Both accept a multipart upload, store it via intake, and block until
//! the transcription backend returns while progress streams over the
//! WebSocket channel.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use oqim_core::upload::FileCategory;
use oqim_core::JobKind;
use oqim_jobs::{JobRequest, ProgressReporter};

use crate::error::AppResult;
use crate::intake::{self, MultipartForm};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/video-to-text", post(video_to_text))
        .route("/audio-to-text", post(audio_to_text))
}

/// POST /api/video-to-text
///
/// Multipart fields: `file` (video), `source_lang` (default `auto`),
/// `target_langs` (comma list, default `en,ru,uz`), optional `client_id`.
async fn video_to_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let form = MultipartForm::read(multipart).await?;
    let asset = intake::store_upload(&state.config, &form, "file", FileCategory::Video).await?;

    let source_lang = form.text("source_lang").unwrap_or("auto").to_string();
    let target_langs: Vec<String> = form
        .text("target_langs")
        .unwrap_or("en,ru,uz")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let reporter = ProgressReporter::new(
        JobKind::VideoToText,
        form.client_id(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(
            JobRequest::VideoToText {
                asset,
                source_lang,
                target_langs,
            },
            &reporter,
        )
        .await?;

    Ok(Json(output.into_json()?))
}

/// POST /api/audio-to-text
///
/// Multipart fields: `file` (audio), optional `client_id`.
async fn audio_to_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let form = MultipartForm::read(multipart).await?;
    let asset = intake::store_upload(&state.config, &form, "file", FileCategory::Audio).await?;

    let reporter = ProgressReporter::new(
        JobKind::AudioToText,
        form.client_id(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(JobRequest::AudioToText { asset }, &reporter)
        .await?;

    Ok(Json(output.into_json()?))
}
