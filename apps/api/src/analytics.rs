//! Usage tracking for the resume features.
//!
//! Events are best-effort: a failed insert must never fail the request that
//! produced it, so `record_event` logs and swallows database errors.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::analytics::AnalyticsEventRow;
use crate::state::AppState;

pub async fn record_event(pool: &PgPool, user_id: Uuid, action_type: &str, details: Value) {
    let result = sqlx::query(
        "INSERT INTO resume_analytics (id, user_id, action_type, action_details) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(action_type)
    .bind(details)
    .execute(pool)
    .await;

    if let Err(e) = result {
        warn!("Failed to record {action_type} analytics event: {e}");
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub generate_count: i64,
    pub ats_check_count: i64,
    pub cover_letter_count: i64,
    pub download_count: i64,
    pub resume_count: i64,
    pub average_ats_score: Option<f64>,
    pub latest_ats_score: Option<i32>,
    pub recent_events: Vec<AnalyticsEventRow>,
}

/// GET /api/v1/analytics/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let counts: Vec<(String, i64)> = sqlx::query_as(
        "SELECT action_type, COUNT(*) FROM resume_analytics \
         WHERE user_id = $1 GROUP BY action_type",
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    let count_for = |action: &str| {
        counts
            .iter()
            .find(|(a, _)| a == action)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };

    let (resume_count, average_ats_score): (i64, Option<f64>) = sqlx::query_as(
        "SELECT COUNT(*), AVG(ats_score)::float8 FROM resume_versions WHERE user_id = $1",
    )
    .bind(user.user_id)
    .fetch_one(&state.db)
    .await?;

    let latest_ats_score: Option<(Option<i32>,)> = sqlx::query_as(
        "SELECT ats_score FROM resume_versions WHERE user_id = $1 \
         ORDER BY generated_at DESC LIMIT 1",
    )
    .bind(user.user_id)
    .fetch_optional(&state.db)
    .await?;

    let recent_events: Vec<AnalyticsEventRow> = sqlx::query_as(
        "SELECT * FROM resume_analytics WHERE user_id = $1 ORDER BY created_at DESC LIMIT 10",
    )
    .bind(user.user_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(AnalyticsSummary {
        generate_count: count_for("generate"),
        ats_check_count: count_for("ats_check"),
        cover_letter_count: count_for("cover_letter"),
        download_count: count_for("download"),
        resume_count,
        average_ats_score,
        latest_ats_score: latest_ats_score.and_then(|(s,)| s),
        recent_events,
    }))
}
