//! ATS compatibility analysis of an arbitrary resume text.

use serde::Serialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::analytics;
use crate::errors::AppError;
use crate::llm_client::{parse_json_response, LlmClient};
use crate::resume::prompts;

#[derive(Debug, Serialize)]
pub struct AtsResponse {
    pub success: bool,
    pub analysis: Value,
    pub degraded: bool,
}

/// Neutral mid-range scores used when the model answer cannot be parsed.
/// The raw text still reaches the user through `recommendations`.
pub fn fallback_analysis(raw_text: &str) -> Value {
    json!({
        "overallScore": 70,
        "categoryScores": {
            "format": 15,
            "keywords": 18,
            "experience": 15,
            "skills": 12,
            "contact": 8,
            "readability": 7,
        },
        "strengths": ["Analysis in progress"],
        "improvements": ["Unable to parse detailed analysis"],
        "missingKeywords": [],
        "recommendations": [raw_text],
    })
}

pub async fn analyze_ats(
    pool: &PgPool,
    llm: &LlmClient,
    user_id: Uuid,
    resume_text: &str,
    job_description: Option<&str>,
) -> Result<AtsResponse, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("Resume text is required".to_string()));
    }

    let system = prompts::ats_system(job_description);
    let raw = llm.call(&system, &prompts::ats_user(resume_text)).await?;

    let (analysis, degraded) = match parse_json_response(&raw) {
        Ok(parsed) => (parsed, false),
        Err(e) => {
            warn!("ATS analysis output was not valid JSON ({e}); returning neutral scores");
            (fallback_analysis(&raw), true)
        }
    };

    analytics::record_event(
        pool,
        user_id,
        "ats_check",
        json!({ "score": analysis.get("overallScore") }),
    )
    .await;

    Ok(AtsResponse {
        success: true,
        analysis,
        degraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_scores_are_fixed() {
        let analysis = fallback_analysis("not json");
        let categories = &analysis["categoryScores"];
        let sum: i64 = ["format", "keywords", "experience", "skills", "contact", "readability"]
            .iter()
            .map(|k| categories[*k].as_i64().unwrap())
            .sum();
        assert_eq!(sum, 75);
        assert_eq!(analysis["overallScore"], 70);
    }

    #[test]
    fn test_fallback_surfaces_raw_text() {
        let analysis = fallback_analysis("The resume looks fine overall.");
        assert_eq!(
            analysis["recommendations"][0],
            "The resume looks fine overall."
        );
    }
}
