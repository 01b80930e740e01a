pub mod documents;
pub mod health;
pub mod speech;
pub mod steganography;
pub mod text_tools;
pub mod transcription;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /video-to-text       POST  multipart upload -> transcript JSON
/// /audio-to-text       POST  multipart upload -> transcript JSON
/// /text-to-speech      POST  JSON -> audio attachment
/// /analyze-document    POST  multipart upload -> analysis JSON
/// /ai-tools            POST  JSON -> tool JSON
/// /steganography       POST  multipart upload -> image attachment or JSON
/// /uzbek-llm           POST  JSON -> {response}
/// /health              GET   liveness probe
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(transcription::router())
        .merge(speech::router())
        .merge(documents::router())
        .merge(text_tools::router())
        .merge(steganography::router())
}
