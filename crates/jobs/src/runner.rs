use oqim_backends::{BackendError, CapabilitySet};
use oqim_core::types::{Job, JobStatus};
use oqim_core::CoreError;

use crate::reporter::ProgressReporter;
use crate::request::{JobOutput, JobRequest};

/// Dispatches validated requests to the matching backend capability.
///
/// One runner instance is constructed at startup with the shared
/// [`CapabilitySet`] and injected into the HTTP state. The runner never
/// retries; a backend failure goes straight to the terminal error.
pub struct JobRunner {
    capabilities: CapabilitySet,
}

impl JobRunner {
    pub fn new(capabilities: CapabilitySet) -> Self {
        Self { capabilities }
    }

    /// Shared capability access for synchronous endpoints that bypass job
    /// tracking (the text tools).
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.capabilities
    }

    /// Execute one job to its terminal state.
    ///
    /// Progress flows through `reporter` while this future runs; the final
    /// report is 100 on success. The caller awaits the terminal result.
    pub async fn run(
        &self,
        request: JobRequest,
        reporter: &ProgressReporter,
    ) -> Result<JobOutput, CoreError> {
        let mut job = Job::new(request.kind());
        job.status = JobStatus::Running;
        tracing::info!(job_id = %job.id, kind = %job.kind, "Job dispatched");

        let result = self.dispatch(request, reporter).await;

        match &result {
            Ok(_) => {
                reporter.finish();
                job.status = JobStatus::Succeeded;
                job.progress = 100;
                tracing::info!(job_id = %job.id, kind = %job.kind, "Job succeeded");
            }
            Err(e) => {
                job.status = JobStatus::Failed;
                job.last_message = e.to_string();
                tracing::error!(job_id = %job.id, kind = %job.kind, error = %e, "Job failed");
            }
        }

        result
    }

    async fn dispatch(
        &self,
        request: JobRequest,
        reporter: &ProgressReporter,
    ) -> Result<JobOutput, CoreError> {
        match request {
            JobRequest::VideoToText {
                asset,
                source_lang,
                target_langs,
            } => {
                let transcript = self
                    .capabilities
                    .transcriber
                    .transcribe(&asset.path, &source_lang, &target_langs, reporter.callback())
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::Json(to_json(&transcript)?))
            }

            JobRequest::AudioToText { asset } => {
                let transcript = self
                    .capabilities
                    .transcriber
                    .transcribe(&asset.path, "auto", &[], reporter.callback())
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::Json(to_json(&transcript)?))
            }

            JobRequest::DocumentAnalysis {
                asset,
                analysis_type,
            } => {
                let analysis = self
                    .capabilities
                    .analyzer
                    .analyze(&asset.path, &analysis_type, reporter.callback())
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::Json(analysis))
            }

            JobRequest::UzbekLlm { prompt, max_length } => {
                let response = self
                    .capabilities
                    .generator
                    .generate(&prompt, max_length, reporter.callback())
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::Json(serde_json::json!({ "response": response })))
            }

            JobRequest::TextToSpeech { text, language } => {
                let path = self
                    .capabilities
                    .synthesizer
                    .synthesize(&text, &language)
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::File {
                    path,
                    content_type: "audio/mp3",
                    download_name: format!("tts_{language}.mp3"),
                })
            }

            JobRequest::SteganographyEncode { asset, text } => {
                let path = self
                    .capabilities
                    .cipher
                    .encode(&asset.path, &text)
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::File {
                    path,
                    content_type: "image/png",
                    download_name: "encoded_image.png".into(),
                })
            }

            JobRequest::SteganographyDecode { asset } => {
                let text = self
                    .capabilities
                    .cipher
                    .decode(&asset.path)
                    .await
                    .map_err(processing)?;
                Ok(JobOutput::Json(serde_json::json!({ "text": text })))
            }
        }
    }
}

/// Translate a backend failure into the `Processing` taxonomy kind.
fn processing(e: BackendError) -> CoreError {
    CoreError::Processing(e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, CoreError> {
    serde_json::to_value(value).map_err(|e| CoreError::Processing(e.to_string()))
}
