//! Upload intake: multipart parsing, validation, and durable storage.
//!
//! Validation rules (allowlists, sanitization) live in `oqim_core::upload`;
//! this module collects the multipart body, applies them, and writes the
//! file synchronously before any job starts.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use oqim_core::upload::{FileCategory, UploadedAsset};
use oqim_core::CoreError;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// A fully buffered multipart form: file parts and plain text fields.
#[derive(Debug, Default)]
pub struct MultipartForm {
    files: HashMap<String, (String, Bytes)>,
    fields: HashMap<String, String>,
}

impl MultipartForm {
    /// Buffer all parts of a multipart request.
    ///
    /// Parts carrying a filename become file entries; the rest become text
    /// fields. The transport-level body limit has already applied by the
    /// time this reads the stream.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name() {
                let filename = filename.to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                form.files.insert(name, (filename, data));
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A text field by name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// A file part by name: `(original filename, data)`.
    pub fn file(&self, name: &str) -> Option<(&str, &Bytes)> {
        self.files
            .get(name)
            .map(|(filename, data)| (filename.as_str(), data))
    }

    /// Connection id supplied by the submitting client, for targeted
    /// progress routing.
    pub fn client_id(&self) -> Option<String> {
        self.text("client_id").map(str::to_string)
    }
}

/// Map multipart read failures, preserving the 413 the body limit layer
/// produces for oversized payloads.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::PayloadTooLarge)
    } else {
        AppError::BadRequest(e.to_string())
    }
}

/// Validate and persist the `part` file of a form under `category`.
///
/// Fails with the legacy messages: `"No file uploaded"` when the part is
/// absent, and whatever `UploadedAsset::validate` reports for an empty
/// filename or a disallowed extension.
pub async fn store_upload(
    config: &ServerConfig,
    form: &MultipartForm,
    part: &str,
    category: FileCategory,
) -> AppResult<UploadedAsset> {
    let (filename, data) = form
        .file(part)
        .ok_or_else(|| AppError::invalid("No file uploaded"))?;
    persist(config, category, filename, data).await
}

/// Validate `filename` against `category` and write `data` to the
/// category-scoped storage path.
pub async fn persist(
    config: &ServerConfig,
    category: FileCategory,
    filename: &str,
    data: &Bytes,
) -> AppResult<UploadedAsset> {
    if data.len() as u64 > config.max_upload_bytes {
        tracing::warn!(
            size = data.len(),
            limit = config.max_upload_bytes,
            "Rejecting oversized upload",
        );
        return Err(CoreError::PayloadTooLarge.into());
    }

    let asset =
        UploadedAsset::validate(&config.upload_root, category, filename, data.len() as u64)?;

    if let Some(parent) = asset.path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
    }
    tokio::fs::write(&asset.path, data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    tracing::debug!(
        path = %asset.path.display(),
        size = asset.size,
        category = ?asset.category,
        "Stored upload",
    );

    Ok(asset)
}
