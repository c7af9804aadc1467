//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::samples::{find_job_sample, JobSample, JOB_SAMPLES};
use crate::analysis::{AnalysisError, AnalysisResult};
use crate::errors::AppError;
use crate::extract::{extract_text, normalize};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Multipart field carrying the resume file.
pub const FIELD_RESUME: &str = "resume";
/// Multipart field carrying free-typed job requirements.
pub const FIELD_JOB_DESCRIPTION: &str = "job_description";
/// Multipart field naming one of the built-in job samples.
pub const FIELD_JOB_SAMPLE: &str = "job_sample";

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub model: String,
    pub result: AnalysisResult,
}

#[derive(Debug, Serialize)]
pub struct JobSamplesResponse {
    pub samples: &'static [JobSample],
}

struct UploadedResume {
    file_name: String,
    bytes: Bytes,
}

#[derive(Default)]
struct AnalysisForm {
    resume: Option<UploadedResume>,
    job_description: Option<String>,
    job_sample: Option<String>,
}

impl AnalysisForm {
    async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = AnalysisForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                FIELD_RESUME => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Could not read resume upload: {e}"))
                    })?;
                    if !file_name.is_empty() {
                        form.resume = Some(UploadedResume { file_name, bytes });
                    }
                }
                FIELD_JOB_DESCRIPTION | FIELD_JOB_SAMPLE => {
                    let text = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read field '{name}': {e}"))
                    })?;
                    if name == FIELD_JOB_DESCRIPTION {
                        form.job_description = Some(text);
                    } else {
                        form.job_sample = Some(text);
                    }
                }
                other => warn!("Ignoring unexpected multipart field '{other}'"),
            }
        }

        Ok(form)
    }

    /// Typed job text wins; otherwise the named sample is used.
    fn job_text(&self) -> Result<String, AppError> {
        if let Some(text) = self.job_description.as_deref().filter(|t| !t.trim().is_empty()) {
            return Ok(text.to_string());
        }

        match self.job_sample.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(title) => find_job_sample(title)
                .map(|s| {
                    info!("Job sample selected: {title}");
                    s.text.to_string()
                })
                .ok_or_else(|| AppError::Validation(format!("Unknown job sample '{title}'"))),
            None => Err(AppError::Validation(
                "Provide the job requirements or select a sample.".to_string(),
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Multipart upload: `resume` (PDF or TXT file) plus either `job_description`
/// or `job_sample`. Extracts and normalizes both texts, then runs one model
/// comparison. Nothing is stored server-side.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Some(analyzer) = state.analyzer.clone() else {
        return Err(AnalysisError::MissingCredential.into());
    };

    let form = AnalysisForm::read(&mut multipart).await?;
    let Some(resume) = form.resume.as_ref() else {
        return Err(AppError::Validation(
            "Upload a resume before starting.".to_string(),
        ));
    };
    let job_text = form.job_text()?;

    let max_chars = state.config.max_job_description_chars;
    if job_text.chars().count() > max_chars {
        return Err(AppError::Validation(format!(
            "Job description exceeds {max_chars} characters"
        )));
    }

    info!("Reading resume '{}'", resume.file_name);
    let resume_text = read_resume(resume).await?;
    info!("Resume read: {} normalized chars", resume_text.len());

    let job_text = normalize(&job_text);
    info!("Job description prepared: {} chars", job_text.len());

    let result = analyzer.analyze(&resume_text, &job_text).await?;
    info!(
        "Analysis finished with compatibility score {}",
        result.compatibility_score
    );

    Ok(Json(AnalysisResponse {
        analysis_id: Uuid::new_v4(),
        analyzed_at: Utc::now(),
        model: analyzer.model_id().to_string(),
        result,
    }))
}

/// GET /api/v1/job-samples
pub async fn handle_job_samples() -> Json<JobSamplesResponse> {
    Json(JobSamplesResponse {
        samples: JOB_SAMPLES,
    })
}

/// PDF parsing is CPU-bound, so extraction runs off the async workers.
async fn read_resume(resume: &UploadedResume) -> Result<String, AppError> {
    let bytes = resume.bytes.clone();
    let file_name = resume.file_name.clone();

    let extracted = tokio::task::spawn_blocking(move || extract_text(&bytes, &file_name))
        .await
        .map_err(|e| {
            if e.is_panic() {
                AppError::Extraction("the document could not be parsed".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("resume extraction task failed: {e}"))
            }
        })?;

    Ok(extracted?)
}
