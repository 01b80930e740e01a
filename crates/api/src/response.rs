//! File attachment responses.
//!
//! Jobs that produce binary artifacts (synthesized audio, encoded images)
//! are streamed back rather than buffered, with a Content-Disposition
//! attachment header carrying the download name.

use std::path::Path;

use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};

/// Stream a local file as an attachment download.
pub async fn file_attachment(
    path: &Path,
    content_type: &'static str,
    download_name: &str,
) -> AppResult<Response> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to open {}: {e}", path.display())))?;

    let body = Body::from_stream(ReaderStream::new(file));

    Response::builder()
        .header(CONTENT_TYPE, content_type)
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{download_name}\""),
        )
        .body(body)
        .map_err(|e| AppError::InternalError(e.to_string()))
}
