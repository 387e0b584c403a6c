use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::analysis::job_analyzer::JobAnalysis;
use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SessionAnalysisRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub job_description: String,
    #[serde(default)]
    pub profile: Profile,
}

/// POST /api/v1/sessions/:id/job-analysis
///
/// Analyzes a job description against the session's current profile.
pub async fn handle_session_job_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SessionAnalysisRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    let session = state.sessions.get(id).await?;
    let analysis = state
        .analyzer
        .analyze(&request.job_description, &session.profile)
        .await?;

    info!(
        "Session {id}: job analysis found {} required skills, {} missing",
        analysis.required_skills.len(),
        analysis.missing_skills.len()
    );
    Ok(Json(analysis))
}

/// POST /api/v1/job-analysis
///
/// Stateless variant: the profile travels in the request body.
pub async fn handle_job_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<JobAnalysis>, AppError> {
    let analysis = state
        .analyzer
        .analyze(&request.job_description, &request.profile)
        .await?;
    Ok(Json(analysis))
}
