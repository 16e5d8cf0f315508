//! Row types for the per-student profile tables.
//!
//! Dates entered through month pickers are stored as the first of the month
//! (`YYYY-MM-01`) and serialized back out as `YYYY-MM` — see `profile::dates`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::profile::dates::month_opt;

/// One row per user, upserted in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_profile: Option<String>,
    pub github_portfolio: Option<String>,
    pub address_city: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub institution_name: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    #[serde(with = "month_opt")]
    pub start_date: Option<NaiveDate>,
    #[serde(with = "month_opt")]
    pub end_date: Option<NaiveDate>,
    pub cgpa_percentage: Option<String>,
    pub relevant_coursework: Option<String>,
    pub is_current: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProjectRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_title: String,
    pub duration_start: Option<String>,
    pub duration_end: Option<String>,
    pub description: Option<String>,
    pub technologies_used: Vec<String>,
    pub role_contribution: Option<String>,
    pub github_demo_link: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub skills: Vec<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub certification_name: String,
    pub issuing_organization: String,
    #[serde(with = "month_opt")]
    pub date_issued: Option<NaiveDate>,
    pub credential_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AchievementRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub issuing_body: Option<String>,
    #[serde(with = "month_opt")]
    pub achievement_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExtracurricularRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_organization: String,
    pub role: Option<String>,
    pub duration_start: Option<String>,
    pub duration_end: Option<String>,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HobbyRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub hobby_name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}
