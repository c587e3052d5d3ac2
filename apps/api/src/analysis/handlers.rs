//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::analyzer::{analyze, Summary};
use crate::errors::AppError;
use crate::logbook::writer::append_log;
use crate::state::AppState;
use crate::taxonomy::RoleProfile;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub resume_text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub name: String,
    pub resume_text: String,
    pub summary: Summary,
}

#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub default_role: String,
    pub roles: Vec<RoleProfile>,
    pub soft_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/roles
///
/// Lists roles in declared order so a client can render the role picker.
pub async fn handle_list_roles(State(state): State<AppState>) -> Json<RolesResponse> {
    let taxonomy = &state.taxonomy;
    Json(RolesResponse {
        default_role: taxonomy.default_role().key.clone(),
        roles: taxonomy.roles().to_vec(),
        soft_skills: taxonomy.soft_skills().to_vec(),
    })
}

/// POST /api/v1/analyze
///
/// Validates the submission, scores it against the requested role and appends
/// an audit record. A failed log append fails the request.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let name = request.name.as_deref().unwrap_or_default().trim().to_string();
    let role = request.role.as_deref().unwrap_or_default().trim().to_string();
    let resume_text = request
        .resume_text
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_string();

    if name.is_empty() {
        return Err(AppError::Validation("Please enter your name.".to_string()));
    }
    if name.chars().any(char::is_control) {
        return Err(AppError::Validation(
            "Name must be a single line of text.".to_string(),
        ));
    }
    if resume_text.is_empty() {
        return Err(AppError::Validation(
            "Please paste your resume text for analysis.".to_string(),
        ));
    }

    // An absent role resolves to the default inside the taxonomy.
    let summary = analyze(&resume_text, &role, &state.taxonomy);
    info!(
        role = %summary.role_key,
        score = summary.score,
        matched = summary.found_for_role.len(),
        expected = summary.expected_skills.len(),
        "Resume analyzed"
    );

    append_log(state.log_store.as_ref(), &name, &summary).await?;

    Ok(Json(AnalyzeResponse {
        name,
        resume_text,
        summary,
    }))
}
