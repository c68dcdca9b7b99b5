//! Gemini `generateContent` client over HTTPS.
//!
//! One blocking POST per call, no retry. The timeout is unbounded unless the
//! caller configures one.

use std::time::Duration;

use serde::Deserialize;

use crate::constants::DEFAULT_ENDPOINT;
use crate::provider::{ModelRequest, TextModel};
use crate::{PipetError, PipetResult};

/// Finish reasons for which the SDK refuses to hand back text.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

pub struct GeminiClient {
    endpoint: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(endpoint: Option<&str>, timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint
                .unwrap_or(DEFAULT_ENDPOINT)
                .trim_end_matches('/')
                .to_string(),
            timeout,
        }
    }

    pub fn generate_url(&self, model_name: &str) -> String {
        format!("{}/{}:generateContent", self.endpoint, model_path(model_name))
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl TextModel for GeminiClient {
    fn generate(&self, request: &ModelRequest<'_>) -> PipetResult<String> {
        let url = self.generate_url(request.model_name);
        let body = serde_json::json!({
            "contents": [
                { "role": "user", "parts": [ { "text": request.prompt } ] }
            ]
        });

        tracing::info!(
            model = %request.model_name,
            prompt_len = request.prompt.len(),
            "Gemini request starting"
        );

        let mut response = ureq::post(&url)
            .header("x-goog-api-key", request.api_key)
            .header("content-type", "application/json")
            .config()
            .http_status_as_error(false)
            .timeout_global(self.timeout)
            .build()
            .send(serde_json::to_vec(&body)?.as_slice())?;

        let status = response.status();
        let text = response.body_mut().read_to_string()?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(PipetError::Provider(format!(
                "Gemini returned {}: {}",
                status.as_u16(),
                api_error_message(&text)
            )));
        }

        let generated = parse_response(&text)?;
        tracing::info!(response_len = generated.len(), "Gemini request complete");
        Ok(generated)
    }
}

/// Resource path for a model name; bare ids get the `models/` prefix.
pub fn model_path(model_name: &str) -> String {
    let name = model_name.trim().trim_start_matches('/');
    if name.starts_with("models/") || name.starts_with("tunedModels/") {
        name.to_string()
    } else {
        format!("models/{}", name)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Text of the first candidate, all parts concatenated.
pub fn parse_response(body: &str) -> PipetResult<String> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;

    if let Some(reason) = parsed.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(PipetError::Provider(format!("prompt blocked: {}", reason)));
    }

    let candidate = parsed
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| PipetError::Provider("response has no candidates".into()))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(PipetError::Provider(format!("response blocked: {}", reason)));
        }
    }

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        return Err(PipetError::Provider("response has no text".into()));
    }
    Ok(texts.concat())
}

fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_path_prefixing() {
        assert_eq!(model_path("models/gemini-2.0-flash"), "models/gemini-2.0-flash");
        assert_eq!(model_path("gemini-1.5-pro"), "models/gemini-1.5-pro");
        assert_eq!(model_path("tunedModels/mine"), "tunedModels/mine");
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new(Some("http://localhost:8080/v1beta/"), None);
        assert_eq!(
            client.generate_url("gemini-2.0-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(
            GeminiClient::default().generate_url("models/gemini-2.0-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_parse_concatenates_parts() {
        let body = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Use terminal "}, {"text": "codes."}]},
                "finishReason": "STOP"
            }]
        }"#;
        assert_eq!(parse_response(body).unwrap(), "Use terminal codes.");
    }

    #[test]
    fn test_parse_uses_first_candidate() {
        let body = r#"{"candidates": [
            {"content": {"parts": [{"text": "first"}]}},
            {"content": {"parts": [{"text": "second"}]}}
        ]}"#;
        assert_eq!(parse_response(body).unwrap(), "first");
    }

    #[test]
    fn test_parse_blocked_prompt() {
        let body = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, PipetError::Provider(ref m) if m.contains("SAFETY")));
    }

    #[test]
    fn test_parse_blocked_candidate() {
        let body = r#"{"candidates": [{"finishReason": "RECITATION"}]}"#;
        assert!(matches!(parse_response(body), Err(PipetError::Provider(_))));
    }

    #[test]
    fn test_parse_no_candidates() {
        assert!(matches!(parse_response("{}"), Err(PipetError::Provider(_))));
    }

    #[test]
    fn test_parse_malformed_json() {
        assert!(matches!(parse_response("not json"), Err(PipetError::Serialization(_))));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body), "API key not valid.");
        assert_eq!(api_error_message(" upstream down \n"), "upstream down");
    }
}
