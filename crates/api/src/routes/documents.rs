//! Document analysis endpoint.

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
    Router::new().route("/analyze-document", post(analyze_document))
}

/// POST /api/analyze-document
///
/// Multipart fields: `file` (pdf/docx/txt/doc), `type` (analysis kind,
/// default `summary`), optional `client_id`.
async fn analyze_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let form = MultipartForm::read(multipart).await?;
    let asset = intake::store_upload(&state.config, &form, "file", FileCategory::Document).await?;

    let analysis_type = form.text("type").unwrap_or("summary").to_string();

    let reporter = ProgressReporter::new(
        JobKind::DocumentAnalysis,
        form.client_id(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(
            JobRequest::DocumentAnalysis {
                asset,
                analysis_type,
            },
            &reporter,
        )
        .await?;

    Ok(Json(output.into_json()?))
}
