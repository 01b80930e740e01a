//! Steganography endpoint: hide text in an image or extract it.
//!
//! One route, two operations selected by the `operation` form field.
//! Encode streams the modified image back; decode returns `{"text": ...}`.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use oqim_core::upload::{extension_allowed, FileCategory};
use oqim_core::JobKind;
use oqim_jobs::{JobOutput, JobRequest, ProgressReporter};

use crate::error::{AppError, AppResult};
use crate::intake::{self, MultipartForm};
use crate::response::file_attachment;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/steganography", post(steganography))
}

/// POST /api/steganography
///
/// Multipart fields: `image`, `operation` (`encode` default / `decode`),
/// `text` (encode only), optional `client_id`.
async fn steganography(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let form = MultipartForm::read(multipart).await?;

    match form.text("operation").unwrap_or("encode") {
        "encode" => encode(&state, &form).await,
        "decode" => decode(&state, &form).await,
        _ => Err(AppError::invalid("Invalid operation specified")),
    }
}

async fn encode(state: &AppState, form: &MultipartForm) -> AppResult<Response> {
    let (Some((filename, data)), Some(text)) = (form.file("image"), form.text("text")) else {
        return Err(AppError::invalid("Image and text required"));
    };
    if !extension_allowed(filename, FileCategory::Image) {
        return Err(AppError::invalid("Invalid image format"));
    }

    let asset = intake::persist(&state.config, FileCategory::Image, filename, data).await?;

    let reporter = ProgressReporter::new(
        JobKind::SteganographyEncode,
        form.client_id(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(
            JobRequest::SteganographyEncode {
                asset,
                text: text.to_string(),
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
            "Encode job produced JSON instead of a file".into(),
        )),
    }
}

async fn decode(state: &AppState, form: &MultipartForm) -> AppResult<Response> {
    let Some((filename, data)) = form.file("image") else {
        return Err(AppError::invalid("Image required"));
    };
    if !extension_allowed(filename, FileCategory::Image) {
        return Err(AppError::invalid("Invalid image format"));
    }

    let asset = intake::persist(&state.config, FileCategory::Image, filename, data).await?;

    let reporter = ProgressReporter::new(
        JobKind::SteganographyDecode,
        form.client_id(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(JobRequest::SteganographyDecode { asset }, &reporter)
        .await?;

    Ok(Json(output.into_json()?).into_response())
}
