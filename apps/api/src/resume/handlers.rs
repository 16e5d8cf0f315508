use axum::{extract::State, Json};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::ResumeVersionRow;
use crate::resume::ats::{analyze_ats, AtsResponse};
use crate::resume::cover_letter::{generate_cover_letter, CoverLetterRequest, CoverLetterResponse};
use crate::resume::generator::{self, GenerateResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub target_role: Option<String>,
    pub job_description: Option<String>,
}

/// POST /api/v1/resume/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generator::generate_resume(
        &state.db,
        &state.llm,
        user.user_id,
        req.target_role,
        req.job_description,
    )
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsRequest {
    pub resume_text: String,
    pub job_description: Option<String>,
}

/// POST /api/v1/resume/ats
pub async fn handle_ats(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AtsRequest>,
) -> Result<Json<AtsResponse>, AppError> {
    let response = analyze_ats(
        &state.db,
        &state.llm,
        user.user_id,
        &req.resume_text,
        req.job_description.as_deref(),
    )
    .await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterBody {
    pub company_name: String,
    pub position: String,
    pub why_interested: Option<String>,
    pub job_description: Option<String>,
}

/// POST /api/v1/resume/cover-letter
pub async fn handle_cover_letter(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<CoverLetterBody>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let response = generate_cover_letter(
        &state.db,
        &state.llm,
        user.user_id,
        CoverLetterRequest {
            company_name: body.company_name,
            position: body.position,
            why_interested: body.why_interested,
            job_description: body.job_description,
        },
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/resume/versions
pub async fn handle_versions(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ResumeVersionRow>>, AppError> {
    Ok(Json(
        generator::list_versions(&state.db, user.user_id).await?,
    ))
}
