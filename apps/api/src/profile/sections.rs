//! Section stores — the add/edit/delete pattern shared by all seven profile
//! sections. Each section is a flat table owned by one user; list order is
//! the manual `display_order`, and a new row always lands at the end.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{
    AchievementRow, CertificationRow, EducationRow, ExtracurricularRow, HobbyRow, ProjectRow,
    SkillRow, StudentProfileRow,
};
use crate::profile::dates::parse_month_opt;

fn required(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Next `display_order` for a user's rows: new entries append at the end.
async fn next_display_order(pool: &PgPool, table: &str, user_id: Uuid) -> Result<i32, AppError> {
    let count: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {table} WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count as i32)
}

async fn delete_row(pool: &PgPool, table: &str, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query(&format!("DELETE FROM {table} WHERE id = $1 AND user_id = $2"))
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Entry {id} not found")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info (one row per user, upserted)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_profile: Option<String>,
    pub github_portfolio: Option<String>,
    pub address_city: Option<String>,
}

pub async fn get_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<StudentProfileRow>, AppError> {
    Ok(
        sqlx::query_as("SELECT * FROM student_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    payload: ProfilePayload,
) -> Result<StudentProfileRow, AppError> {
    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_profiles
            (id, user_id, full_name, email, phone_number,
             linkedin_profile, github_portfolio, address_city)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO UPDATE SET
            full_name = EXCLUDED.full_name,
            email = EXCLUDED.email,
            phone_number = EXCLUDED.phone_number,
            linkedin_profile = EXCLUDED.linkedin_profile,
            github_portfolio = EXCLUDED.github_portfolio,
            address_city = EXCLUDED.address_city,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.phone_number)
    .bind(&payload.linkedin_profile)
    .bind(&payload.github_portfolio)
    .bind(&payload.address_city)
    .fetch_one(pool)
    .await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EducationPayload {
    pub institution_name: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    /// `YYYY-MM` from the month picker.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub cgpa_percentage: Option<String>,
    pub relevant_coursework: Option<String>,
    #[serde(default)]
    pub is_current: bool,
}

/// Normalizes month-picker dates for storage. A current entry never stores an
/// end date, regardless of what the form submitted.
pub fn education_dates(
    payload: &EducationPayload,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
    let start = parse_month_opt(&payload.start_date).map_err(AppError::Validation)?;
    let end = if payload.is_current {
        None
    } else {
        parse_month_opt(&payload.end_date).map_err(AppError::Validation)?
    };
    Ok((start, end))
}

pub async fn list_education(pool: &PgPool, user_id: Uuid) -> Result<Vec<EducationRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM student_education WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_education(
    pool: &PgPool,
    user_id: Uuid,
    payload: EducationPayload,
) -> Result<EducationRow, AppError> {
    required(&payload.institution_name, "Institution name")?;
    required(&payload.degree, "Degree")?;
    let (start, end) = education_dates(&payload)?;
    let order = next_display_order(pool, "student_education", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_education
            (id, user_id, institution_name, degree, field_of_study, start_date,
             end_date, cgpa_percentage, relevant_coursework, is_current, display_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.institution_name)
    .bind(&payload.degree)
    .bind(&payload.field_of_study)
    .bind(start)
    .bind(end)
    .bind(&payload.cgpa_percentage)
    .bind(&payload.relevant_coursework)
    .bind(payload.is_current)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_education(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: EducationPayload,
) -> Result<EducationRow, AppError> {
    required(&payload.institution_name, "Institution name")?;
    required(&payload.degree, "Degree")?;
    let (start, end) = education_dates(&payload)?;

    sqlx::query_as(
        r#"
        UPDATE student_education SET
            institution_name = $3, degree = $4, field_of_study = $5,
            start_date = $6, end_date = $7, cgpa_percentage = $8,
            relevant_coursework = $9, is_current = $10
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.institution_name)
    .bind(&payload.degree)
    .bind(&payload.field_of_study)
    .bind(start)
    .bind(end)
    .bind(&payload.cgpa_percentage)
    .bind(&payload.relevant_coursework)
    .bind(payload.is_current)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Education entry {id} not found")))
}

pub async fn delete_education(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    delete_row(pool, "student_education", user_id, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProjectPayload {
    pub project_title: String,
    pub duration_start: Option<String>,
    pub duration_end: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub technologies_used: Vec<String>,
    pub role_contribution: Option<String>,
    pub github_demo_link: Option<String>,
}

pub async fn list_projects(pool: &PgPool, user_id: Uuid) -> Result<Vec<ProjectRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM student_projects WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_project(
    pool: &PgPool,
    user_id: Uuid,
    payload: ProjectPayload,
) -> Result<ProjectRow, AppError> {
    required(&payload.project_title, "Project title")?;
    let order = next_display_order(pool, "student_projects", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_projects
            (id, user_id, project_title, duration_start, duration_end, description,
             technologies_used, role_contribution, github_demo_link, display_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.project_title)
    .bind(&payload.duration_start)
    .bind(&payload.duration_end)
    .bind(&payload.description)
    .bind(&payload.technologies_used)
    .bind(&payload.role_contribution)
    .bind(&payload.github_demo_link)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_project(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: ProjectPayload,
) -> Result<ProjectRow, AppError> {
    required(&payload.project_title, "Project title")?;

    sqlx::query_as(
        r#"
        UPDATE student_projects SET
            project_title = $3, duration_start = $4, duration_end = $5,
            description = $6, technologies_used = $7, role_contribution = $8,
            github_demo_link = $9
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.project_title)
    .bind(&payload.duration_start)
    .bind(&payload.duration_end)
    .bind(&payload.description)
    .bind(&payload.technologies_used)
    .bind(&payload.role_contribution)
    .bind(&payload.github_demo_link)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))
}

pub async fn delete_project(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    delete_row(pool, "student_projects", user_id, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SkillPayload {
    pub category: String,
    pub skills: Vec<String>,
}

pub fn validate_skill(payload: &SkillPayload) -> Result<(), AppError> {
    required(&payload.category, "Skill category")?;
    if payload.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_skills(pool: &PgPool, user_id: Uuid) -> Result<Vec<SkillRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM student_skills WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_skill(
    pool: &PgPool,
    user_id: Uuid,
    payload: SkillPayload,
) -> Result<SkillRow, AppError> {
    validate_skill(&payload)?;
    let order = next_display_order(pool, "student_skills", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_skills (id, user_id, category, skills, display_order)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.category)
    .bind(&payload.skills)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_skill(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: SkillPayload,
) -> Result<SkillRow, AppError> {
    validate_skill(&payload)?;

    sqlx::query_as(
        r#"
        UPDATE student_skills SET category = $3, skills = $4
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.category)
    .bind(&payload.skills)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Skill group {id} not found")))
}

pub async fn delete_skill(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    delete_row(pool, "student_skills", user_id, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CertificationPayload {
    pub certification_name: String,
    pub issuing_organization: String,
    pub date_issued: Option<String>,
    pub credential_url: Option<String>,
}

pub async fn list_certifications(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<CertificationRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM student_certifications WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_certification(
    pool: &PgPool,
    user_id: Uuid,
    payload: CertificationPayload,
) -> Result<CertificationRow, AppError> {
    required(&payload.certification_name, "Certification name")?;
    required(&payload.issuing_organization, "Issuing organization")?;
    let issued = parse_month_opt(&payload.date_issued).map_err(AppError::Validation)?;
    let order = next_display_order(pool, "student_certifications", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_certifications
            (id, user_id, certification_name, issuing_organization,
             date_issued, credential_url, display_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.certification_name)
    .bind(&payload.issuing_organization)
    .bind(issued)
    .bind(&payload.credential_url)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_certification(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: CertificationPayload,
) -> Result<CertificationRow, AppError> {
    required(&payload.certification_name, "Certification name")?;
    required(&payload.issuing_organization, "Issuing organization")?;
    let issued = parse_month_opt(&payload.date_issued).map_err(AppError::Validation)?;

    sqlx::query_as(
        r#"
        UPDATE student_certifications SET
            certification_name = $3, issuing_organization = $4,
            date_issued = $5, credential_url = $6
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.certification_name)
    .bind(&payload.issuing_organization)
    .bind(issued)
    .bind(&payload.credential_url)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Certification {id} not found")))
}

pub async fn delete_certification(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    delete_row(pool, "student_certifications", user_id, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// Achievements
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AchievementPayload {
    pub title: String,
    pub issuing_body: Option<String>,
    pub achievement_date: Option<String>,
    pub description: Option<String>,
}

pub async fn list_achievements(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AchievementRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM student_achievements WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_achievement(
    pool: &PgPool,
    user_id: Uuid,
    payload: AchievementPayload,
) -> Result<AchievementRow, AppError> {
    required(&payload.title, "Achievement title")?;
    let date = parse_month_opt(&payload.achievement_date).map_err(AppError::Validation)?;
    let order = next_display_order(pool, "student_achievements", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_achievements
            (id, user_id, title, issuing_body, achievement_date, description, display_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.title)
    .bind(&payload.issuing_body)
    .bind(date)
    .bind(&payload.description)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_achievement(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: AchievementPayload,
) -> Result<AchievementRow, AppError> {
    required(&payload.title, "Achievement title")?;
    let date = parse_month_opt(&payload.achievement_date).map_err(AppError::Validation)?;

    sqlx::query_as(
        r#"
        UPDATE student_achievements SET
            title = $3, issuing_body = $4, achievement_date = $5, description = $6
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.title)
    .bind(&payload.issuing_body)
    .bind(date)
    .bind(&payload.description)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Achievement {id} not found")))
}

pub async fn delete_achievement(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    delete_row(pool, "student_achievements", user_id, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// Extracurricular
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtracurricularPayload {
    pub activity_organization: String,
    pub role: Option<String>,
    pub duration_start: Option<String>,
    pub duration_end: Option<String>,
    pub description: Option<String>,
}

pub async fn list_extracurricular(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ExtracurricularRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM student_extracurricular WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_extracurricular(
    pool: &PgPool,
    user_id: Uuid,
    payload: ExtracurricularPayload,
) -> Result<ExtracurricularRow, AppError> {
    required(&payload.activity_organization, "Organization")?;
    let order = next_display_order(pool, "student_extracurricular", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO student_extracurricular
            (id, user_id, activity_organization, role, duration_start,
             duration_end, description, display_order)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.activity_organization)
    .bind(&payload.role)
    .bind(&payload.duration_start)
    .bind(&payload.duration_end)
    .bind(&payload.description)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_extracurricular(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: ExtracurricularPayload,
) -> Result<ExtracurricularRow, AppError> {
    required(&payload.activity_organization, "Organization")?;

    sqlx::query_as(
        r#"
        UPDATE student_extracurricular SET
            activity_organization = $3, role = $4, duration_start = $5,
            duration_end = $6, description = $7
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.activity_organization)
    .bind(&payload.role)
    .bind(&payload.duration_start)
    .bind(&payload.duration_end)
    .bind(&payload.description)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Activity {id} not found")))
}

pub async fn delete_extracurricular(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<(), AppError> {
    delete_row(pool, "student_extracurricular", user_id, id).await
}

// ────────────────────────────────────────────────────────────────────────────
// Hobbies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HobbyPayload {
    pub hobby_name: String,
    pub description: Option<String>,
}

pub async fn list_hobbies(pool: &PgPool, user_id: Uuid) -> Result<Vec<HobbyRow>, AppError> {
    Ok(sqlx::query_as(
        "SELECT * FROM hobbies WHERE user_id = $1 ORDER BY display_order ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_hobby(
    pool: &PgPool,
    user_id: Uuid,
    payload: HobbyPayload,
) -> Result<HobbyRow, AppError> {
    required(&payload.hobby_name, "Hobby name")?;
    let order = next_display_order(pool, "hobbies", user_id).await?;

    Ok(sqlx::query_as(
        r#"
        INSERT INTO hobbies (id, user_id, hobby_name, description, display_order)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&payload.hobby_name)
    .bind(&payload.description)
    .bind(order)
    .fetch_one(pool)
    .await?)
}

pub async fn update_hobby(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    payload: HobbyPayload,
) -> Result<HobbyRow, AppError> {
    required(&payload.hobby_name, "Hobby name")?;

    sqlx::query_as(
        r#"
        UPDATE hobbies SET hobby_name = $3, description = $4
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(&payload.hobby_name)
    .bind(&payload.description)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Hobby {id} not found")))
}

pub async fn delete_hobby(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
    delete_row(pool, "hobbies", user_id, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_current_education_drops_end_date() {
        let payload = EducationPayload {
            institution_name: "State University".to_string(),
            degree: "B.Tech".to_string(),
            field_of_study: None,
            start_date: Some("2022-08".to_string()),
            end_date: Some("2026-05".to_string()),
            cgpa_percentage: None,
            relevant_coursework: None,
            is_current: true,
        };
        let (start, end) = education_dates(&payload).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2022, 8, 1));
        assert_eq!(end, None);
    }

    #[test]
    fn test_completed_education_keeps_end_date() {
        let payload = EducationPayload {
            institution_name: "State University".to_string(),
            degree: "B.Tech".to_string(),
            field_of_study: None,
            start_date: Some("2018-08".to_string()),
            end_date: Some("2022-05".to_string()),
            cgpa_percentage: None,
            relevant_coursework: None,
            is_current: false,
        };
        let (_, end) = education_dates(&payload).unwrap();
        assert_eq!(end, NaiveDate::from_ymd_opt(2022, 5, 1));
    }

    #[test]
    fn test_bad_month_is_a_validation_error() {
        let payload = EducationPayload {
            institution_name: "State University".to_string(),
            degree: "B.Tech".to_string(),
            field_of_study: None,
            start_date: Some("08/2022".to_string()),
            end_date: None,
            cgpa_percentage: None,
            relevant_coursework: None,
            is_current: false,
        };
        assert!(matches!(
            education_dates(&payload),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_skill_payload_needs_one_nonempty_skill() {
        let empty = SkillPayload {
            category: "Languages".to_string(),
            skills: vec!["  ".to_string()],
        };
        assert!(validate_skill(&empty).is_err());

        let ok = SkillPayload {
            category: "Languages".to_string(),
            skills: vec!["Rust".to_string()],
        };
        assert!(validate_skill(&ok).is_ok());
    }
}
