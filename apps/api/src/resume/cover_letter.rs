//! Cover letter generation from the profile plus a small slice of context:
//! two most recent education entries, three projects, and all skill groups.

use serde::Serialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::try_join;
use tracing::warn;
use uuid::Uuid;

use crate::analytics;
use crate::errors::AppError;
use crate::llm_client::{parse_json_response, LlmClient};
use crate::profile::sections;
use crate::resume::prompts;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub success: bool,
    pub cover_letter: String,
    pub subject: String,
    pub highlights: Value,
    pub degraded: bool,
}

pub struct CoverLetterRequest {
    pub company_name: String,
    pub position: String,
    pub why_interested: Option<String>,
    pub job_description: Option<String>,
}

pub async fn generate_cover_letter(
    pool: &PgPool,
    llm: &LlmClient,
    user_id: Uuid,
    req: CoverLetterRequest,
) -> Result<CoverLetterResponse, AppError> {
    if req.company_name.trim().is_empty() || req.position.trim().is_empty() {
        return Err(AppError::Validation(
            "Company name and position are required".to_string(),
        ));
    }

    let (profile, education, projects, skills) = try_join!(
        sections::get_profile(pool, user_id),
        sections::list_education(pool, user_id),
        sections::list_projects(pool, user_id),
        sections::list_skills(pool, user_id),
    )?;
    let profile = profile.ok_or_else(|| {
        AppError::NotFound("Profile not found. Please complete your profile first.".to_string())
    })?;

    let education: Vec<_> = education.into_iter().take(2).collect();
    let projects: Vec<_> = projects.into_iter().take(3).collect();

    let jd_line = req
        .job_description
        .as_deref()
        .filter(|jd| !jd.trim().is_empty())
        .map(|jd| format!("Job Description: {jd}\n"))
        .unwrap_or_default();

    let user_prompt = format!(
        "Write a cover letter for:\n\
         Company: {}\n\
         Position: {}\n\
         Why interested: {}\n\
         {}\n\
         Applicant Profile:\n\
         Name: {}\n\
         Email: {}\n\
         Education: {}\n\
         Recent Projects: {}\n\
         Skills: {}",
        req.company_name,
        req.position,
        req.why_interested.as_deref().unwrap_or(""),
        jd_line,
        profile.full_name.as_deref().unwrap_or(""),
        profile.email.as_deref().unwrap_or(""),
        serde_json::to_string(&education).unwrap_or_else(|_| "[]".to_string()),
        serde_json::to_string(&projects).unwrap_or_else(|_| "[]".to_string()),
        serde_json::to_string(&skills).unwrap_or_else(|_| "[]".to_string()),
    );

    let raw = llm.call(&prompts::cover_letter_system(), &user_prompt).await?;

    let response = match parse_json_response(&raw) {
        Ok(parsed) => {
            let cover_letter = parsed
                .get("coverLetter")
                .and_then(Value::as_str)
                .unwrap_or(&raw)
                .to_string();
            let subject = parsed
                .get("subject")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| default_subject(&req.position, &req.company_name));
            let highlights = parsed
                .get("highlights")
                .cloned()
                .unwrap_or_else(|| json!([]));
            CoverLetterResponse {
                success: true,
                cover_letter,
                subject,
                highlights,
                degraded: false,
            }
        }
        Err(e) => {
            warn!("Cover letter output was not valid JSON ({e}); returning raw text");
            CoverLetterResponse {
                success: true,
                cover_letter: raw,
                subject: default_subject(&req.position, &req.company_name),
                highlights: json!(["Generated cover letter"]),
                degraded: true,
            }
        }
    };

    analytics::record_event(
        pool,
        user_id,
        "cover_letter",
        json!({ "companyName": req.company_name, "position": req.position }),
    )
    .await;

    Ok(response)
}

fn default_subject(position: &str, company: &str) -> String {
    format!("Application for {position} at {company}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_subject_line() {
        assert_eq!(
            default_subject("SDE Intern", "Acme"),
            "Application for SDE Intern at Acme"
        );
    }
}
