//! Stateless scoring endpoints: the caller sends the data, nothing is stored.

use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::ats::diff::{diff_reports, ReportDelta};
use crate::ats::scorer::{score, AtsReport};
use crate::models::profile::Profile;

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub previous: AtsReport,
    pub current: AtsReport,
}

/// POST /api/v1/ats/score
pub async fn handle_score(Json(profile): Json<Profile>) -> Json<AtsReport> {
    let report = score(&profile);
    debug!("Scored profile: {}/100", report.overall_score);
    Json(report)
}

/// POST /api/v1/ats/diff
pub async fn handle_diff(Json(request): Json<DiffRequest>) -> Json<ReportDelta> {
    Json(diff_reports(&request.previous, &request.current))
}
