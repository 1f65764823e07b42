//! Axum route handlers for the Enrichment API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::enrichment::models::{CandidateProfile, EnrichedContent, JobAnalysis, JobDescription};
use crate::errors::AppError;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichRequest {
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub job: Option<JobDescription>,
    #[serde(default)]
    pub client_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/enrich
///
/// Runs the full pipeline. Always answers with a fully populated document;
/// generation failures surface as fallback content, not as errors.
/// Dropping the request future (client disconnect) abandons pending calls.
pub async fn handle_enrich(
    State(state): State<AppState>,
    Json(request): Json<EnrichRequest>,
) -> Json<EnrichedContent> {
    info!(
        "Enrich request: {} roles, job: {}",
        request.candidate.experience.len(),
        request.job.is_some()
    );

    let content = state
        .enricher
        .enrich(
            &request.candidate,
            request.job.as_ref(),
            request.client_name.as_deref(),
        )
        .await;

    Json(content)
}

/// POST /api/v1/enrich/job-analysis
///
/// Previews the job-analysis step for a job description.
pub async fn handle_job_analysis(
    State(state): State<AppState>,
    Json(job): Json<JobDescription>,
) -> Result<Json<JobAnalysis>, AppError> {
    if job.is_blank() {
        return Err(AppError::Validation(
            "job must have text or at least one of requirements, skills, responsibilities"
                .to_string(),
        ));
    }

    Ok(Json(state.enricher.analyze_job(&job).await))
}
