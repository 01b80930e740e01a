use std::path::PathBuf;

use oqim_core::{CoreError, JobKind, UploadedAsset};

/// A validated unit of work, one variant per [`JobKind`].
///
/// Construction happens in the HTTP layer after intake; by the time a
/// request reaches the runner its input is already validated.
#[derive(Debug)]
pub enum JobRequest {
    VideoToText {
        asset: UploadedAsset,
        source_lang: String,
        target_langs: Vec<String>,
    },
    AudioToText {
        asset: UploadedAsset,
    },
    DocumentAnalysis {
        asset: UploadedAsset,
        analysis_type: String,
    },
    UzbekLlm {
        prompt: String,
        max_length: u32,
    },
    TextToSpeech {
        text: String,
        language: String,
    },
    SteganographyEncode {
        asset: UploadedAsset,
        text: String,
    },
    SteganographyDecode {
        asset: UploadedAsset,
    },
}

impl JobRequest {
    pub fn kind(&self) -> JobKind {
        match self {
            JobRequest::VideoToText { .. } => JobKind::VideoToText,
            JobRequest::AudioToText { .. } => JobKind::AudioToText,
            JobRequest::DocumentAnalysis { .. } => JobKind::DocumentAnalysis,
            JobRequest::UzbekLlm { .. } => JobKind::UzbekLlm,
            JobRequest::TextToSpeech { .. } => JobKind::TextToSpeech,
            JobRequest::SteganographyEncode { .. } => JobKind::SteganographyEncode,
            JobRequest::SteganographyDecode { .. } => JobKind::SteganographyDecode,
        }
    }
}

/// Terminal result of a job: a JSON body or a file to stream back.
#[derive(Debug)]
pub enum JobOutput {
    Json(serde_json::Value),
    File {
        path: PathBuf,
        /// MIME type for the response, e.g. `audio/mp3` or `image/png`.
        content_type: &'static str,
        /// Filename offered in the Content-Disposition attachment header.
        download_name: String,
    },
}

impl JobOutput {
    /// Unwrap a JSON output; a file here means a dispatch bug.
    pub fn into_json(self) -> Result<serde_json::Value, CoreError> {
        match self {
            JobOutput::Json(value) => Ok(value),
            JobOutput::File { .. } => Err(CoreError::Processing(
                "Job produced a file where JSON was expected".into(),
            )),
        }
    }
}
