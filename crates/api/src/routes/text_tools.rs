//! Text endpoints: the AI tools (summarize, sentiment, keywords) and the
//! Uzbek LLM generation endpoint.
//!
//! The tools run synchronously against the text toolkit capability and
//! emit no progress; generation goes through the job runner like every
//! other long-running kind.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use oqim_core::{CoreError, JobKind};
use oqim_jobs::{JobRequest, ProgressReporter};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ai-tools", post(ai_tools))
        .route("/uzbek-llm", post(uzbek_llm))
}

#[derive(Debug, Deserialize)]
struct AiToolsRequest {
    #[serde(default)]
    text: String,
    #[serde(default = "default_tool")]
    tool: String,
}

fn default_tool() -> String {
    "summarize".into()
}

/// POST /api/ai-tools
///
/// `tool` selects the capability method; anything outside the known set
/// is a 400. An empty `text` is rejected before the backend is touched.
async fn ai_tools(
    State(state): State<AppState>,
    Json(request): Json<AiToolsRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if request.text.is_empty() {
        return Err(AppError::invalid("No text provided"));
    }

    let tools = &state.runner.capabilities().text_tools;
    let result = match request.tool.as_str() {
        "summarize" => tools.summarize(&request.text).await,
        "sentiment" => tools.sentiment(&request.text).await,
        "keywords" => tools.keywords(&request.text).await,
        _ => return Err(AppError::invalid("Invalid tool specified")),
    };

    let value = result.map_err(|e| CoreError::Processing(e.to_string()))?;
    Ok(Json(value))
}

#[derive(Debug, Deserialize)]
struct LlmRequest {
    #[serde(default)]
    prompt: String,
    #[serde(default = "default_max_length")]
    max_length: u32,
    client_id: Option<String>,
}

fn default_max_length() -> u32 {
    100
}

/// POST /api/uzbek-llm
///
/// Generates text from `prompt`, streaming generation progress to the
/// submitting client, and returns `{"response": ...}`.
async fn uzbek_llm(
    State(state): State<AppState>,
    Json(request): Json<LlmRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if request.prompt.is_empty() {
        return Err(AppError::invalid("No prompt provided"));
    }

    let reporter = ProgressReporter::new(
        JobKind::UzbekLlm,
        request.client_id.clone(),
        state.progress_tx.clone(),
    );
    let output = state
        .runner
        .run(
            JobRequest::UzbekLlm {
                prompt: request.prompt,
                max_length: request.max_length,
            },
            &reporter,
        )
        .await?;

    Ok(Json(output.into_json()?))
}
