use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tokio::try_join;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{
    AchievementRow, CertificationRow, EducationRow, ExtracurricularRow, HobbyRow, ProjectRow,
    SkillRow, StudentProfileRow,
};
use crate::profile::completeness::{compute_completeness, CompletenessReport};
use crate::profile::sections;
use crate::state::AppState;

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Option<StudentProfileRow>>, AppError> {
    let profile = sections::get_profile(&state.db, user.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::ProfilePayload>,
) -> Result<Json<StudentProfileRow>, AppError> {
    let profile = sections::upsert_profile(&state.db, user.user_id, payload).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profile/completeness
pub async fn handle_completeness(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<CompletenessReport>, AppError> {
    let (profile, education, projects, skills) = try_join!(
        sections::get_profile(&state.db, user.user_id),
        sections::list_education(&state.db, user.user_id),
        sections::list_projects(&state.db, user.user_id),
        sections::list_skills(&state.db, user.user_id),
    )?;
    Ok(Json(compute_completeness(
        profile.as_ref(),
        education.len(),
        projects.len(),
        skills.len(),
    )))
}

// Each section gets the same four handlers. The store functions scope every
// query by user_id, so a well-formed token can never touch another student's
// rows.

/// GET /api/v1/education
pub async fn handle_list_education(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<EducationRow>>, AppError> {
    Ok(Json(
        sections::list_education(&state.db, user.user_id).await?,
    ))
}

/// POST /api/v1/education
pub async fn handle_create_education(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::EducationPayload>,
) -> Result<(StatusCode, Json<EducationRow>), AppError> {
    let row = sections::insert_education(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/education/:id
pub async fn handle_update_education(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::EducationPayload>,
) -> Result<Json<EducationRow>, AppError> {
    let row = sections::update_education(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/education/:id
pub async fn handle_delete_education(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_education(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(sections::list_projects(&state.db, user.user_id).await?))
}

/// POST /api/v1/projects
pub async fn handle_create_project(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::ProjectPayload>,
) -> Result<(StatusCode, Json<ProjectRow>), AppError> {
    let row = sections::insert_project(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/projects/:id
pub async fn handle_update_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::ProjectPayload>,
) -> Result<Json<ProjectRow>, AppError> {
    let row = sections::update_project(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/projects/:id
pub async fn handle_delete_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_project(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/skills
pub async fn handle_list_skills(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<SkillRow>>, AppError> {
    Ok(Json(sections::list_skills(&state.db, user.user_id).await?))
}

/// POST /api/v1/skills
pub async fn handle_create_skill(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::SkillPayload>,
) -> Result<(StatusCode, Json<SkillRow>), AppError> {
    let row = sections::insert_skill(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/skills/:id
pub async fn handle_update_skill(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::SkillPayload>,
) -> Result<Json<SkillRow>, AppError> {
    let row = sections::update_skill(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/skills/:id
pub async fn handle_delete_skill(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_skill(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/certifications
pub async fn handle_list_certifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CertificationRow>>, AppError> {
    Ok(Json(
        sections::list_certifications(&state.db, user.user_id).await?,
    ))
}

/// POST /api/v1/certifications
pub async fn handle_create_certification(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::CertificationPayload>,
) -> Result<(StatusCode, Json<CertificationRow>), AppError> {
    let row = sections::insert_certification(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/certifications/:id
pub async fn handle_update_certification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::CertificationPayload>,
) -> Result<Json<CertificationRow>, AppError> {
    let row = sections::update_certification(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/certifications/:id
pub async fn handle_delete_certification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_certification(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/achievements
pub async fn handle_list_achievements(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<AchievementRow>>, AppError> {
    Ok(Json(
        sections::list_achievements(&state.db, user.user_id).await?,
    ))
}

/// POST /api/v1/achievements
pub async fn handle_create_achievement(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::AchievementPayload>,
) -> Result<(StatusCode, Json<AchievementRow>), AppError> {
    let row = sections::insert_achievement(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/achievements/:id
pub async fn handle_update_achievement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::AchievementPayload>,
) -> Result<Json<AchievementRow>, AppError> {
    let row = sections::update_achievement(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/achievements/:id
pub async fn handle_delete_achievement(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_achievement(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/extracurricular
pub async fn handle_list_extracurricular(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ExtracurricularRow>>, AppError> {
    Ok(Json(
        sections::list_extracurricular(&state.db, user.user_id).await?,
    ))
}

/// POST /api/v1/extracurricular
pub async fn handle_create_extracurricular(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::ExtracurricularPayload>,
) -> Result<(StatusCode, Json<ExtracurricularRow>), AppError> {
    let row = sections::insert_extracurricular(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/extracurricular/:id
pub async fn handle_update_extracurricular(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::ExtracurricularPayload>,
) -> Result<Json<ExtracurricularRow>, AppError> {
    let row = sections::update_extracurricular(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/extracurricular/:id
pub async fn handle_delete_extracurricular(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_extracurricular(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/hobbies
pub async fn handle_list_hobbies(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<HobbyRow>>, AppError> {
    Ok(Json(sections::list_hobbies(&state.db, user.user_id).await?))
}

/// POST /api/v1/hobbies
pub async fn handle_create_hobby(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<sections::HobbyPayload>,
) -> Result<(StatusCode, Json<HobbyRow>), AppError> {
    let row = sections::insert_hobby(&state.db, user.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/hobbies/:id
pub async fn handle_update_hobby(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<sections::HobbyPayload>,
) -> Result<Json<HobbyRow>, AppError> {
    let row = sections::update_hobby(&state.db, user.user_id, id, payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/hobbies/:id
pub async fn handle_delete_hobby(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    sections::delete_hobby(&state.db, user.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
