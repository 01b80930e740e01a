//! HTTP client for the remote processing services.
//!
//! Each capability is served by a standalone service reachable over HTTP.
//! [`RemoteServices`] wraps them all behind the capability traits using a
//! single pooled [`reqwest::Client`]. Media inputs are shipped as
//! multipart uploads; binary artifacts coming back (synthesized audio,
//! encoded images) are written under a configured artifact directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::capability::{
    CapabilitySet, DocumentAnalyzer, ImageCipher, ProgressFn, SpeechSynthesizer, TextGenerator,
    TextToolkit, Transcriber, Transcript,
};
use crate::error::BackendError;

/// Base URLs of the processing services plus the local artifact directory.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub transcriber_url: String,
    pub synthesizer_url: String,
    pub analyzer_url: String,
    pub text_tools_url: String,
    pub cipher_url: String,
    pub generator_url: String,
    /// Directory for artifacts downloaded from the services.
    pub artifact_dir: PathBuf,
}

/// Shared HTTP client for every remote capability.
pub struct RemoteServices {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl RemoteServices {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Build a [`CapabilitySet`] where every slot is this client.
    pub fn into_set(self) -> CapabilitySet {
        let shared = Arc::new(self);
        CapabilitySet {
            transcriber: shared.clone(),
            synthesizer: shared.clone(),
            analyzer: shared.clone(),
            text_tools: shared.clone(),
            cipher: shared.clone(),
            generator: shared,
        }
    }

    /// POST a JSON body and decode a JSON response.
    async fn post_json<T: DeserializeOwned>(
        &self,
        url: String,
        body: &serde_json::Value,
    ) -> Result<T, BackendError> {
        let response = self.client.post(url).json(body).send().await?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }

    /// POST a local file as a multipart upload with extra form fields.
    async fn post_file(
        &self,
        url: String,
        path: &Path,
        fields: &[(&'static str, String)],
    ) -> Result<reqwest::Response, BackendError> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", reqwest::multipart::Part::bytes(bytes).file_name(filename));
        for (name, value) in fields {
            form = form.text(*name, value.clone());
        }

        let response = self.client.post(url).multipart(form).send().await?;
        Self::check_status(response).await
    }

    /// Map a non-2xx response into [`BackendError::Service`].
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Service {
            status: status.as_u16(),
            body,
        })
    }

    /// Write downloaded artifact bytes under the artifact directory.
    async fn save_artifact(&self, bytes: &[u8], extension: &str) -> Result<PathBuf, BackendError> {
        tokio::fs::create_dir_all(&self.config.artifact_dir).await?;
        let path = self
            .config
            .artifact_dir
            .join(format!("{}.{extension}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

#[async_trait]
impl Transcriber for RemoteServices {
    async fn transcribe(
        &self,
        path: &Path,
        source_lang: &str,
        target_langs: &[String],
        progress: ProgressFn,
    ) -> Result<Transcript, BackendError> {
        progress(10, "Uploading media to transcription service");
        let response = self
            .post_file(
                format!("{}/transcribe", self.config.transcriber_url),
                path,
                &[
                    ("source_lang", source_lang.to_string()),
                    ("target_langs", target_langs.join(",")),
                ],
            )
            .await?;

        progress(90, "Transcription received");
        response
            .json::<Transcript>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SpeechSynthesizer for RemoteServices {
    async fn synthesize(&self, text: &str, language: &str) -> Result<PathBuf, BackendError> {
        let response = self
            .client
            .post(format!("{}/synthesize", self.config.synthesizer_url))
            .json(&serde_json::json!({ "text": text, "language": language }))
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let bytes = response.bytes().await?;
        self.save_artifact(&bytes, "mp3").await
    }
}

#[async_trait]
impl DocumentAnalyzer for RemoteServices {
    async fn analyze(
        &self,
        path: &Path,
        analysis_type: &str,
        progress: ProgressFn,
    ) -> Result<serde_json::Value, BackendError> {
        progress(10, "Uploading document");
        let response = self
            .post_file(
                format!("{}/analyze", self.config.analyzer_url),
                path,
                &[("type", analysis_type.to_string())],
            )
            .await?;

        progress(90, "Analysis received");
        response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl TextToolkit for RemoteServices {
    async fn summarize(&self, text: &str) -> Result<serde_json::Value, BackendError> {
        self.post_json(
            format!("{}/summarize", self.config.text_tools_url),
            &serde_json::json!({ "text": text }),
        )
        .await
    }

    async fn sentiment(&self, text: &str) -> Result<serde_json::Value, BackendError> {
        self.post_json(
            format!("{}/sentiment", self.config.text_tools_url),
            &serde_json::json!({ "text": text }),
        )
        .await
    }

    async fn keywords(&self, text: &str) -> Result<serde_json::Value, BackendError> {
        self.post_json(
            format!("{}/keywords", self.config.text_tools_url),
            &serde_json::json!({ "text": text }),
        )
        .await
    }
}

/// Response shape of the steganography service's decode endpoint.
#[derive(Debug, Deserialize)]
struct DecodedText {
    text: String,
}

#[async_trait]
impl ImageCipher for RemoteServices {
    async fn encode(&self, path: &Path, text: &str) -> Result<PathBuf, BackendError> {
        let response = self
            .post_file(
                format!("{}/encode", self.config.cipher_url),
                path,
                &[("text", text.to_string())],
            )
            .await?;

        let bytes = response.bytes().await?;
        self.save_artifact(&bytes, "png").await
    }

    async fn decode(&self, path: &Path) -> Result<String, BackendError> {
        let response = self
            .post_file(format!("{}/decode", self.config.cipher_url), path, &[])
            .await?;
        let decoded: DecodedText = response
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;
        Ok(decoded.text)
    }
}

/// Response shape of the generation service.
#[derive(Debug, Deserialize)]
struct Generated {
    response: String,
}

#[async_trait]
impl TextGenerator for RemoteServices {
    async fn generate(
        &self,
        prompt: &str,
        max_length: u32,
        progress: ProgressFn,
    ) -> Result<String, BackendError> {
        progress(10, "Submitting prompt");
        let generated: Generated = self
            .post_json(
                format!("{}/generate", self.config.generator_url),
                &serde_json::json!({ "prompt": prompt, "max_length": max_length }),
            )
            .await?;
        progress(90, "Generation received");
        Ok(generated.response)
    }
}
