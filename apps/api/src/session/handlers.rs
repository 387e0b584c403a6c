//! Axum route handlers for sessions: profile edits, report, preview and navigation.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::ats::diff::{diff_reports, ReportDelta};
use crate::ats::scorer::{is_score_ready, score, AtsReport};
use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::profile::edits::{apply_edit, ProfileEdit};
use crate::profile::render::render_profile_markdown;
use crate::session::navigation::{Step, UiLanguage};
use crate::session::store::AppSession;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub profile: Profile,
    pub current_step: Step,
    pub history: Vec<Step>,
    pub theme: String,
    pub language: UiLanguage,
    /// Whether the profile is complete enough to show the ATS score.
    pub score_ready: bool,
}

impl From<&AppSession> for SessionView {
    fn from(session: &AppSession) -> Self {
        SessionView {
            id: session.id,
            profile: session.profile.clone(),
            current_step: session.current_step(),
            history: session.history.steps().to_vec(),
            theme: session.theme.clone(),
            language: session.language,
            score_ready: is_score_ready(&session.profile),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub profile: Profile,
    pub created_id: Option<Uuid>,
    pub report: AtsReport,
    pub delta: ReportDelta,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub step: Step,
}

#[derive(Debug, Deserialize)]
pub struct PreferencesRequest {
    pub theme: Option<String>,
    pub language: Option<UiLanguage>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(SessionView::from(&session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionView::from(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/edits
///
/// Applies one edit and returns the new profile together with its report and
/// the delta against the report before the edit.
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<ProfileEdit>,
) -> Result<Json<EditResponse>, AppError> {
    let today = Utc::now().date_naive();

    let response = state
        .sessions
        .update(id, |session| {
            let before = score(&session.profile);
            let outcome = apply_edit(&session.profile, edit, today)?;
            let report = score(&outcome.profile);
            let delta = diff_reports(&before, &report);
            session.profile = outcome.profile.clone();
            Ok::<_, AppError>(EditResponse {
                profile: outcome.profile,
                created_id: outcome.created_id,
                report,
                delta,
            })
        })
        .await?;

    if response.delta.is_unchanged() {
        debug!("Session {id}: edit applied, report unchanged");
    } else {
        debug!(
            "Session {id}: edit applied, score {} ({:+})",
            response.report.overall_score, response.delta.overall_change
        );
    }
    Ok(Json(response))
}

/// GET /api/v1/sessions/:id/report
pub async fn handle_session_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsReport>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(score(&session.profile)))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let markdown = render_profile_markdown(&session.profile);
    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        markdown,
    ))
}

/// POST /api/v1/sessions/:id/navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NavigateRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |session| {
            session.history.navigate_to(request.step);
            Ok::<_, AppError>(SessionView::from(&*session))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/back
///
/// At the first step this is a no-op and returns the unchanged session.
pub async fn handle_back(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |session| {
            session.history.go_back();
            Ok::<_, AppError>(SessionView::from(&*session))
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/home
pub async fn handle_home(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update(id, |session| {
            session.history.go_home();
            Ok::<_, AppError>(SessionView::from(&*session))
        })
        .await?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/preferences
pub async fn handle_preferences(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PreferencesRequest>,
) -> Result<Json<SessionView>, AppError> {
    if let Some(theme) = &request.theme {
        if theme.trim().is_empty() {
            return Err(AppError::Validation("theme cannot be empty".to_string()));
        }
    }

    let view = state
        .sessions
        .update(id, |session| {
            if let Some(theme) = request.theme {
                session.theme = theme.trim().to_string();
            }
            if let Some(language) = request.language {
                session.language = language;
            }
            Ok::<_, AppError>(SessionView::from(&*session))
        })
        .await?;

    info!("Session {id}: theme={} language={:?}", view.theme, view.language);
    Ok(Json(view))
}
