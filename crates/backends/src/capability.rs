//! Capability traits for the external processing backends.
//!
//! One trait per algorithm family. Implementations must be `Send + Sync`
//! so a single instance of each can be constructed at startup and shared
//! read-only across request handlers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Progress callback handed into long-running capabilities.
///
/// Invocable zero or more times during execution, synchronously, from
/// inside backend code. It must never block on the job's final result.
pub type ProgressFn = Arc<dyn Fn(u8, &str) + Send + Sync>;

/// Transcription result: recognized text plus per-language translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

/// Speech recognition with optional translation.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe the media file at `path`, translating into each of
    /// `target_langs`. `source_lang` may be `"auto"`.
    async fn transcribe(
        &self,
        path: &Path,
        source_lang: &str,
        target_langs: &[String],
        progress: ProgressFn,
    ) -> Result<Transcript, BackendError>;
}

/// Text-to-speech synthesis.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` in `language`; returns the path of the rendered
    /// audio file.
    async fn synthesize(&self, text: &str, language: &str) -> Result<PathBuf, BackendError>;
}

/// Structured analysis of PDF/DOCX/TXT documents.
#[async_trait]
pub trait DocumentAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        path: &Path,
        analysis_type: &str,
        progress: ProgressFn,
    ) -> Result<serde_json::Value, BackendError>;
}

/// Lightweight text tools: summarization, sentiment, keyword extraction.
#[async_trait]
pub trait TextToolkit: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<serde_json::Value, BackendError>;
    async fn sentiment(&self, text: &str) -> Result<serde_json::Value, BackendError>;
    async fn keywords(&self, text: &str) -> Result<serde_json::Value, BackendError>;
}

/// Steganographic text embedding and extraction in images.
#[async_trait]
pub trait ImageCipher: Send + Sync {
    /// Hide `text` inside the image at `path`; returns the encoded image.
    async fn encode(&self, path: &Path, text: &str) -> Result<PathBuf, BackendError>;

    /// Extract hidden text from the image at `path`.
    async fn decode(&self, path: &Path) -> Result<String, BackendError>;
}

/// Uzbek language model text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        max_length: u32,
        progress: ProgressFn,
    ) -> Result<String, BackendError>;
}

/// One shared instance of every capability, constructed at process start
/// and injected into the job runner.
#[derive(Clone)]
pub struct CapabilitySet {
    pub transcriber: Arc<dyn Transcriber>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub analyzer: Arc<dyn DocumentAnalyzer>,
    pub text_tools: Arc<dyn TextToolkit>,
    pub cipher: Arc<dyn ImageCipher>,
    pub generator: Arc<dyn TextGenerator>,
}
