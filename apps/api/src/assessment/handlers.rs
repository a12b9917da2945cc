//! Axum route handlers for the Assessment API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::assessment::prompts::EMPTY_JD_WARNING;
use crate::assessment::session::{jd_highlights, start_jd_assessment, JdHighlights};
use crate::errors::AppError;
use crate::models::chat::Turn;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartAssessmentRequest {
    #[serde(default)]
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct StartAssessmentResponse {
    pub session_id: Uuid,
    pub highlights: JdHighlights,
    pub history: Vec<Turn>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitResponseRequest {
    #[serde(default)]
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponseResponse {
    pub feedback: String,
    pub turn_count: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionDetailResponse {
    pub session_id: Uuid,
    pub job_description: String,
    pub history: Vec<Turn>,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/assessments
///
/// Opens a session seeded with the JD and returns the sidebar highlights.
pub async fn handle_start_assessment(
    State(state): State<AppState>,
    Json(request): Json<StartAssessmentRequest>,
) -> Result<Json<StartAssessmentResponse>, AppError> {
    if request.jd_text.is_empty() {
        return Err(AppError::Validation(EMPTY_JD_WARNING.to_string()));
    }

    let session = start_jd_assessment(&request.jd_text);
    let history = session.history.clone();
    let session_id = state.sessions.insert(session).await;
    info!(
        "Opened assessment session {session_id} (jd_len={})",
        request.jd_text.len()
    );

    Ok(Json(StartAssessmentResponse {
        session_id,
        highlights: jd_highlights(&request.jd_text),
        history,
    }))
}

/// POST /api/v1/assessments/:id/responses
///
/// Sends one answer to the model and returns its feedback.
pub async fn handle_submit_response(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitResponseRequest>,
) -> Result<Json<SubmitResponseResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Assessment {session_id} not found")))?;

    let mut session = session.lock().await;
    let feedback = session
        .send_message(state.llm.as_ref(), &request.response)
        .await?;
    debug!(
        "Session {session_id}: exchange {} complete",
        session.exchange_count()
    );

    Ok(Json(SubmitResponseResponse {
        feedback,
        turn_count: session.history.len(),
    }))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionDetailResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Assessment {session_id} not found")))?;

    let session = session.lock().await;
    Ok(Json(SessionDetailResponse {
        session_id: session.id,
        job_description: session.job_description.clone(),
        history: session.history.clone(),
        created_at: session.created_at,
    }))
}

/// DELETE /api/v1/assessments/:id
///
/// Ends the interaction. The history is discarded.
pub async fn handle_end_assessment(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(session_id).await {
        return Err(AppError::NotFound(format!(
            "Assessment {session_id} not found"
        )));
    }
    info!("Closed assessment session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}
