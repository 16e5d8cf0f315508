/// LLM Client — the single point of entry for all AI gateway calls.
///
/// ARCHITECTURAL RULE: No other module may call the gateway directly.
/// All model interactions MUST go through this module.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
/// The model used for all gateway calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Rate limits exceeded, please try again later.")]
    RateLimited,

    #[error("Payment required, please add credits to the AI workspace.")]
    PaymentRequired,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("AI response contained no content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The single gateway client shared by the resume generator, the ATS analyzer,
/// and the cover-letter generator.
///
/// No local retry: rate-limit and payment failures are surfaced to the caller
/// with their own messages; the upstream service owns throttling.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends one system + user message pair and returns the raw text of the
    /// first choice.
    pub async fn call(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(GATEWAY_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("AI gateway returned {}: {}", status, body);
            return Err(match status.as_u16() {
                429 => LlmError::RateLimited,
                402 => LlmError::PaymentRequired,
                s => LlmError::Api {
                    status: s,
                    message: body,
                },
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("AI gateway call succeeded ({} chars)", content.len());
        Ok(content)
    }
}

/// Extracts the JSON payload from ```json ... ``` or ``` ... ``` code fences
/// in model output. Models frequently wrap JSON in fences despite instructions
/// not to, sometimes after a prose preamble, so the opener is searched for
/// anywhere in the text rather than only at the start.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let fenced = ["```json", "```"]
        .into_iter()
        .find_map(|tag| text.find(tag).map(|at| &text[at + tag.len()..]));
    match fenced {
        Some(body) => {
            let body = body.trim_start();
            match body.find("```") {
                Some(close) => body[..close].trim_end(),
                None => body,
            }
        }
        None => text,
    }
}

/// Parses model output as JSON after fence-stripping.
pub fn parse_json_response(text: &str) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_str(strip_json_fences(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_unterminated() {
        // Missing closing fence: strip the opener and hand the rest to the parser.
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_after_prose_preamble() {
        let input = "Here is the analysis:\n```json\n{\"overallScore\": 88}\n```";
        assert_eq!(strip_json_fences(input), "{\"overallScore\": 88}");
    }

    #[test]
    fn test_parse_json_response_prose_then_fence() {
        let v = parse_json_response("Sure!\n```json\n{\"overallScore\": 88}\n```\nHope that helps.")
            .unwrap();
        assert_eq!(v["overallScore"], 88);
    }

    #[test]
    fn test_parse_json_response_fenced() {
        let v = parse_json_response("```json\n{\"a\": 1}\n```").unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_parse_json_response_prose_fails() {
        assert!(parse_json_response("Sorry, I cannot help with that.").is_err());
    }
}
