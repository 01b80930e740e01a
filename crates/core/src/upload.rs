//! Upload validation rules: category allowlists and filename sanitization.
//!
//! The rules here are pure; writing the file to disk is the HTTP layer's
//! job. Keeping validation I/O-free lets the allowlist and sanitizer be
//! tested exhaustively.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::CoreError;

/// Upload category, each with its own extension allowlist and storage
/// subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Video,
    Audio,
    Document,
    Image,
}

impl FileCategory {
    /// Allowed extensions for this category, lowercase without the dot.
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        match self {
            FileCategory::Video => &["mp4", "avi", "mov", "mkv"],
            FileCategory::Audio => &["mp3", "wav", "m4a", "ogg"],
            FileCategory::Document => &["pdf", "docx", "txt", "doc"],
            FileCategory::Image => &["png", "jpg", "jpeg", "bmp"],
        }
    }

    /// Storage subdirectory under the upload root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Document => "documents",
            FileCategory::Image => "images",
        }
    }

    /// All categories, for exhaustive validation tests.
    pub fn all() -> [FileCategory; 4] {
        [
            FileCategory::Video,
            FileCategory::Audio,
            FileCategory::Document,
            FileCategory::Image,
        ]
    }
}

/// Check whether `filename` carries an extension allowed for `category`.
///
/// The comparison is case-insensitive. A name without any `.` has no
/// extension and is always rejected.
pub fn extension_allowed(filename: &str, category: FileCategory) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            category.allowed_extensions().contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Sanitize an uploaded filename for use as a path component.
///
/// Directory components are stripped (everything up to the last `/` or
/// `\`), and any character outside `[A-Za-z0-9._-]` becomes `_`. Leading
/// dots are replaced as well, so the result can never be a dotfile or a
/// traversal sequence. Sanitization is idempotent and never empty.
pub fn sanitize_filename(filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let mut out: String = basename
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
            _ => '_',
        })
        .collect();

    // A name of only dots would sanitize to "." or "..".
    while out.starts_with('.') {
        out.replace_range(..1, "_");
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

/// A validated, persisted upload.
///
/// Immutable once created; deletion is an external cleanup concern.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedAsset {
    pub original_name: String,
    pub sanitized_name: String,
    pub category: FileCategory,
    pub path: PathBuf,
    pub size: u64,
}

impl UploadedAsset {
    /// Validate a filename against `category` and compute the storage path
    /// `<root>/<category-dir>/<sanitized-name>`.
    ///
    /// Fails with `InvalidInput` on an empty filename or a disallowed
    /// extension, using the legacy wire messages.
    pub fn validate(
        root: &Path,
        category: FileCategory,
        original_name: &str,
        size: u64,
    ) -> Result<Self, CoreError> {
        if original_name.is_empty() {
            return Err(CoreError::invalid("No file selected"));
        }
        if !extension_allowed(original_name, category) {
            return Err(CoreError::invalid("File type not allowed"));
        }

        let sanitized_name = sanitize_filename(original_name);
        let path = root.join(category.dir_name()).join(&sanitized_name);

        Ok(Self {
            original_name: original_name.to_string(),
            sanitized_name,
            category,
            path,
            size,
        })
    }
}
