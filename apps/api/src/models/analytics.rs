use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Append-only log of resume-feature actions ("generate", "ats_check",
/// "cover_letter", "download").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AnalyticsEventRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action_type: String,
    pub action_details: Option<Value>,
    pub created_at: DateTime<Utc>,
}
