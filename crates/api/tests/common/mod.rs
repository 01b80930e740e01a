//! Shared helpers for API integration tests.
//!
//! Builds the full application router with the production middleware stack
//! and a stubbed capability set, so tests exercise the same code paths as
//! the binary without any remote services.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tower::ServiceExt;

use oqim_api::config::ServerConfig;
use oqim_api::progress::spawn_progress_forwarder;
use oqim_api::router::build_app_router;
use oqim_api::state::AppState;
use oqim_api::ws::WsManager;
use oqim_backends::{
    BackendError, CapabilitySet, DocumentAnalyzer, ImageCipher, ProgressFn, RemoteConfig,
    SpeechSynthesizer, TextGenerator, TextToolkit, Transcriber, Transcript,
};
use oqim_jobs::JobRunner;

/// Canned backend answering every capability without leaving the process.
pub struct StubBackend {
    /// Where synthesized/encoded artifacts get written.
    artifact_dir: PathBuf,
}

#[async_trait]
impl Transcriber for StubBackend {
    async fn transcribe(
        &self,
        _path: &Path,
        _source_lang: &str,
        _target_langs: &[String],
        progress: ProgressFn,
    ) -> Result<Transcript, BackendError> {
        progress(50, "Transcribing");
        Ok(Transcript {
            text: "hi".into(),
            translations: HashMap::from([
                ("en".to_string(), "hi".to_string()),
                ("ru".to_string(), "привет".to_string()),
            ]),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for StubBackend {
    async fn synthesize(&self, _text: &str, language: &str) -> Result<PathBuf, BackendError> {
        let path = self.artifact_dir.join(format!("stub_{language}.mp3"));
        tokio::fs::write(&path, b"FAKEMP3").await?;
        Ok(path)
    }
}

#[async_trait]
impl DocumentAnalyzer for StubBackend {
    async fn analyze(
        &self,
        _path: &Path,
        analysis_type: &str,
        progress: ProgressFn,
    ) -> Result<serde_json::Value, BackendError> {
        progress(50, "Parsing");
        Ok(serde_json::json!({ "type": analysis_type, "summary": "ok" }))
    }
}

#[async_trait]
impl TextToolkit for StubBackend {
    async fn summarize(&self, _text: &str) -> Result<serde_json::Value, BackendError> {
        Ok(serde_json::json!({ "summary": "short" }))
    }
    async fn sentiment(&self, _text: &str) -> Result<serde_json::Value, BackendError> {
        Ok(serde_json::json!({ "sentiment": "positive" }))
    }
    async fn keywords(&self, _text: &str) -> Result<serde_json::Value, BackendError> {
        Ok(serde_json::json!({ "keywords": ["a", "b"] }))
    }
}

#[async_trait]
impl ImageCipher for StubBackend {
    async fn encode(&self, _path: &Path, _text: &str) -> Result<PathBuf, BackendError> {
        let path = self.artifact_dir.join("stub_encoded.png");
        tokio::fs::write(&path, b"FAKEPNG").await?;
        Ok(path)
    }
    async fn decode(&self, _path: &Path) -> Result<String, BackendError> {
        Ok("hidden".into())
    }
}

#[async_trait]
impl TextGenerator for StubBackend {
    async fn generate(
        &self,
        prompt: &str,
        _max_length: u32,
        progress: ProgressFn,
    ) -> Result<String, BackendError> {
        progress(40, "Generating");
        Ok(format!("echo: {prompt}"))
    }
}

/// Capability set where every slot is a [`StubBackend`].
pub fn stub_capabilities(artifact_dir: &Path) -> CapabilitySet {
    let stub = Arc::new(StubBackend {
        artifact_dir: artifact_dir.to_path_buf(),
    });
    CapabilitySet {
        transcriber: stub.clone(),
        synthesizer: stub.clone(),
        analyzer: stub.clone(),
        text_tools: stub.clone(),
        cipher: stub.clone(),
        generator: stub,
    }
}

/// Build a test `ServerConfig` rooted at a temporary upload directory.
pub fn test_config(upload_root: &Path, max_upload_bytes: u64) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        max_upload_bytes,
        upload_root: upload_root.to_path_buf(),
        backends: RemoteConfig {
            transcriber_url: "http://127.0.0.1:9001".into(),
            synthesizer_url: "http://127.0.0.1:9002".into(),
            analyzer_url: "http://127.0.0.1:9003".into(),
            text_tools_url: "http://127.0.0.1:9004".into(),
            cipher_url: "http://127.0.0.1:9005".into(),
            generator_url: "http://127.0.0.1:9006".into(),
            artifact_dir: upload_root.join("artifacts"),
        },
    }
}

/// Build the full application router with stubbed capabilities.
///
/// This mirrors the wiring in `main.rs` so tests exercise the same
/// middleware stack (CORS, request ID, body limit, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(upload_root: &Path) -> Router {
    build_test_app_with_limit(upload_root, 500 * 1024 * 1024)
}

/// Like [`build_test_app`] but with a custom body size limit.
pub fn build_test_app_with_limit(upload_root: &Path, max_upload_bytes: u64) -> Router {
    let config = test_config(upload_root, max_upload_bytes);

    let ws_manager = Arc::new(WsManager::new());
    let (progress_tx, progress_rx) = mpsc::unbounded_channel();
    let _forwarder = spawn_progress_forwarder(Arc::clone(&ws_manager), progress_rx);

    let runner = Arc::new(JobRunner::new(stub_capabilities(upload_root)));

    let state = AppState {
        config: Arc::new(config.clone()),
        ws_manager,
        runner,
        progress_tx,
    };

    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Issue a POST with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Multipart body builder for upload tests.
pub struct MultipartBody {
    boundary: &'static str,
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "oqim-test-boundary",
            bytes: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Finish the body, returning `(content_type, bytes)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.bytes
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.bytes,
        )
    }
}

/// Issue a POST with a multipart body.
pub async fn post_multipart(app: Router, uri: &str, form: MultipartBody) -> Response<Body> {
    let (content_type, bytes) = form.finish();
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type)
            .body(Body::from(bytes))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

/// Collect a response body into raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec()
}

/// Assert an error response: status code plus the legacy `error` message.
pub async fn assert_error(response: Response<Body>, status: StatusCode, message: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"], message);
}
