//! Proxy to the Judge0 code-execution service.
//!
//! The service key never reaches the browser; clients submit source through
//! this endpoint and get the Judge0 result back verbatim.

use axum::{extract::State, Json};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

const JUDGE0_URL: &str =
    "https://judge0-ce.p.rapidapi.com/submissions?base64_encoded=false&wait=true";
const JUDGE0_HOST: &str = "judge0-ce.p.rapidapi.com";

/// Judge0 language IDs for the languages the practice editor offers.
pub fn language_id(language: &str) -> Option<u32> {
    match language.to_lowercase().as_str() {
        "python" => Some(71),
        "javascript" => Some(63),
        "java" => Some(62),
        "cpp" => Some(54),
        "c" => Some(50),
        _ => None,
    }
}

#[derive(Clone)]
pub struct JudgeClient {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct Submission<'a> {
    language_id: u32,
    source_code: &'a str,
    stdin: &'a str,
}

impl JudgeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Submits source code with `wait=true` and returns the Judge0 result
    /// object (stdout, stderr, status, timing) untouched.
    pub async fn execute(
        &self,
        language: &str,
        code: &str,
        stdin: &str,
    ) -> Result<Value, AppError> {
        let language_id = language_id(language)
            .ok_or_else(|| AppError::Validation("Unsupported language".to_string()))?;

        info!("Submitting {language} code to Judge0 (language_id: {language_id})");

        let response = self
            .client
            .post(JUDGE0_URL)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", JUDGE0_HOST)
            .json(&Submission {
                language_id,
                source_code: code,
                stdin,
            })
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Judge0 request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Judge0 submission error: {status} {body}");
            return Err(AppError::Upstream(format!(
                "Failed to submit code to Judge0 (status {status})"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid Judge0 response: {e}")))
    }
}

#[derive(Debug, Deserialize)]
pub struct ExecuteRequest {
    pub code: String,
    pub language: String,
    pub stdin: Option<String>,
}

/// POST /api/v1/code/execute
pub async fn handle_execute(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(req): Json<ExecuteRequest>,
) -> Result<Json<Value>, AppError> {
    if req.code.trim().is_empty() {
        return Err(AppError::Validation("Code is required".to_string()));
    }
    let result = state
        .judge
        .execute(&req.language, &req.code, req.stdin.as_deref().unwrap_or(""))
        .await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_ids_match_judge0() {
        assert_eq!(language_id("python"), Some(71));
        assert_eq!(language_id("javascript"), Some(63));
        assert_eq!(language_id("java"), Some(62));
        assert_eq!(language_id("cpp"), Some(54));
        assert_eq!(language_id("c"), Some(50));
    }

    #[test]
    fn test_language_lookup_is_case_insensitive() {
        assert_eq!(language_id("Python"), Some(71));
        assert_eq!(language_id("JAVA"), Some(62));
    }

    #[test]
    fn test_unknown_language_is_none() {
        assert_eq!(language_id("rust"), None);
        assert_eq!(language_id(""), None);
    }
}
