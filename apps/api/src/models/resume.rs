use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// An immutable snapshot of generated resume content.
/// Created by the generator; never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeVersionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    /// "general" or "role-based".
    pub resume_type: String,
    pub target_role: Option<String>,
    pub ats_score: Option<i32>,
    /// The generator's structured output, stored verbatim.
    pub metadata: Value,
    pub generated_at: DateTime<Utc>,
}
