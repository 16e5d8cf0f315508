//! Full resume generation: gather every profile section, have the model
//! enhance and structure it, and persist the result as an immutable version.

use serde::Serialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::try_join;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analytics;
use crate::errors::AppError;
use crate::llm_client::{parse_json_response, LlmClient};
use crate::models::profile::StudentProfileRow;
use crate::models::resume::ResumeVersionRow;
use crate::profile::sections;
use crate::resume::prompts;

/// Everything the model sees. Serialized verbatim into the user prompt so the
/// model works from the same field names the section editors use.
#[derive(Debug, Serialize)]
pub struct ResumeBundle {
    pub profile: StudentProfileRow,
    pub education: Vec<crate::models::profile::EducationRow>,
    pub projects: Vec<crate::models::profile::ProjectRow>,
    pub skills: Vec<crate::models::profile::SkillRow>,
    pub certifications: Vec<crate::models::profile::CertificationRow>,
    pub achievements: Vec<crate::models::profile::AchievementRow>,
    pub extracurricular: Vec<crate::models::profile::ExtracurricularRow>,
    pub hobbies: Vec<crate::models::profile::HobbyRow>,
}

/// Loads all eight sections concurrently. A missing profile row is the only
/// fatal condition; every other section may simply be empty.
pub async fn fetch_bundle(pool: &PgPool, user_id: Uuid) -> Result<ResumeBundle, AppError> {
    let (profile, education, projects, skills, certifications, achievements, extracurricular, hobbies) = try_join!(
        sections::get_profile(pool, user_id),
        sections::list_education(pool, user_id),
        sections::list_projects(pool, user_id),
        sections::list_skills(pool, user_id),
        sections::list_certifications(pool, user_id),
        sections::list_achievements(pool, user_id),
        sections::list_extracurricular(pool, user_id),
        sections::list_hobbies(pool, user_id),
    )?;

    let profile = profile.ok_or_else(|| {
        AppError::NotFound("Profile not found. Please complete your profile first.".to_string())
    })?;

    Ok(ResumeBundle {
        profile,
        education,
        projects,
        skills,
        certifications,
        achievements,
        extracurricular,
        hobbies,
    })
}

/// When the model returns prose instead of JSON, keep the raw text as the
/// summary and fall back to the stored sections unenhanced. The caller marks
/// the response as degraded so the client can show a notice.
pub fn fallback_content(raw_text: &str, bundle: &ResumeBundle) -> Value {
    json!({
        "summary": raw_text,
        "formattedEducation": bundle.education,
        "formattedProjects": bundle.projects,
        "formattedSkills": bundle.skills,
        "formattedCertifications": bundle.certifications,
        "formattedAchievements": bundle.achievements,
        "formattedExtracurricular": bundle.extracurricular,
        "formattedHobbies": bundle.hobbies,
        "atsScore": 75,
        "recommendations": ["Complete profile review recommended"],
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub resume_content: Value,
    pub resume_id: Uuid,
    pub profile: StudentProfileRow,
    /// True when the model output failed to parse and the unenhanced sections
    /// were substituted.
    pub degraded: bool,
}

pub async fn generate_resume(
    pool: &PgPool,
    llm: &LlmClient,
    user_id: Uuid,
    target_role: Option<String>,
    job_description: Option<String>,
) -> Result<GenerateResponse, AppError> {
    let target_role = target_role.filter(|r| !r.trim().is_empty());
    let bundle = fetch_bundle(pool, user_id).await?;

    let system = prompts::generation_system(target_role.as_deref());
    let resume_data = serde_json::to_string_pretty(&bundle)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume data: {e}")))?;
    let user_prompt = prompts::generation_user(
        target_role.as_deref(),
        job_description.as_deref(),
        &resume_data,
    );

    info!("Generating resume for user {user_id} (target_role: {target_role:?})");
    let raw = llm.call(&system, &user_prompt).await?;

    let (resume_content, degraded) = match parse_json_response(&raw) {
        Ok(content) => (content, false),
        Err(e) => {
            warn!("Resume generation output was not valid JSON ({e}); returning raw sections");
            (fallback_content(&raw, &bundle), true)
        }
    };

    let ats_score = resume_content
        .get("atsScore")
        .and_then(Value::as_i64)
        .map(|s| s as i32);

    let version = save_version(
        pool,
        user_id,
        target_role.as_deref(),
        ats_score,
        &resume_content,
    )
    .await?;

    analytics::record_event(
        pool,
        user_id,
        "generate",
        json!({ "targetRole": target_role, "atsScore": ats_score }),
    )
    .await;

    Ok(GenerateResponse {
        success: true,
        resume_content,
        resume_id: version.id,
        profile: bundle.profile,
        degraded,
    })
}

async fn save_version(
    pool: &PgPool,
    user_id: Uuid,
    target_role: Option<&str>,
    ats_score: Option<i32>,
    content: &Value,
) -> Result<ResumeVersionRow, AppError> {
    let resume_type = if target_role.is_some() {
        "role-based"
    } else {
        "general"
    };

    Ok(sqlx::query_as(
        r#"
        INSERT INTO resume_versions (id, user_id, resume_type, target_role, ats_score, metadata)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(resume_type)
    .bind(target_role)
    .bind(ats_score)
    .bind(content)
    .fetch_one(pool)
    .await?)
}

pub async fn list_versions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ResumeVersionRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM resume_versions WHERE user_id = $1 ORDER BY generated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_version(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<ResumeVersionRow, AppError> {
    sqlx::query_as("SELECT * FROM resume_versions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume version {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn empty_bundle() -> ResumeBundle {
        ResumeBundle {
            profile: StudentProfileRow {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                full_name: Some("Asha Rao".to_string()),
                email: Some("asha@example.edu".to_string()),
                phone_number: Some("555-0100".to_string()),
                linkedin_profile: None,
                github_portfolio: None,
                address_city: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            education: vec![],
            projects: vec![],
            skills: vec![],
            certifications: vec![],
            achievements: vec![],
            extracurricular: vec![],
            hobbies: vec![],
        }
    }

    #[test]
    fn test_fallback_keeps_raw_text_as_summary() {
        let content = fallback_content("Here is a resume I wrote for you...", &empty_bundle());
        assert_eq!(content["summary"], "Here is a resume I wrote for you...");
        assert_eq!(content["atsScore"], 75);
    }

    #[test]
    fn test_fallback_has_every_formatted_section() {
        let content = fallback_content("prose", &empty_bundle());
        for key in [
            "formattedEducation",
            "formattedProjects",
            "formattedSkills",
            "formattedCertifications",
            "formattedAchievements",
            "formattedExtracurricular",
            "formattedHobbies",
        ] {
            assert!(content[key].is_array(), "missing {key}");
        }
    }
}
