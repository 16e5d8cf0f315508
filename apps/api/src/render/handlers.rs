use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
};
use serde_json::json;
use uuid::Uuid;

use crate::analytics;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::profile::sections;
use crate::render::normalize::{normalize_resume, pdf_filename};
use crate::render::pdf::render_pdf;
use crate::resume::generator;
use crate::state::AppState;

/// POST /api/v1/resume/:id/pdf
///
/// Renders a stored resume version to PDF. The version must belong to the
/// authenticated user.
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let version = generator::get_version(&state.db, user.user_id, id).await?;
    let profile = sections::get_profile(&state.db, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Profile not found. Please complete your profile first.".to_string())
        })?;

    let resume = normalize_resume(&version.metadata, &profile);
    let bytes = render_pdf(&resume, &state.config.font_dir)?;

    let filename = pdf_filename(
        profile.full_name.as_deref().unwrap_or("Resume"),
        version.target_role.as_deref(),
    );

    analytics::record_event(
        &state.db,
        user.user_id,
        "download",
        json!({ "resumeId": id, "filename": filename }),
    )
    .await;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid download filename: {e}")))?,
    );

    Ok((headers, bytes))
}
