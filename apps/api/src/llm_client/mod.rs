/// LLM Client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through `safe_call` so that every request
/// shares the process-wide rate limiter and the retry policy.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod extract;
pub mod prompts;
pub mod rate_limit;
pub mod retry;

use crate::llm_client::extract::extract_json;
use crate::llm_client::rate_limit::RateLimiter;
use crate::llm_client::retry::{with_retry, RetryPolicy};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-3-flash-preview";

// Generation parameters, fixed per call path.
const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("no valid JSON found in response")]
    NoJson,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("call deadline exceeded after {}s", .0.as_secs())]
    DeadlineExceeded(Duration),
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Result of a model call: parsed JSON when the caller expected it, raw text
/// otherwise. No shape beyond "parses as JSON" is enforced — the specific
/// fields are a prompt-level convention.
#[derive(Debug, Clone)]
pub enum ModelResponse {
    Json(Value),
    Text(String),
}

impl ModelResponse {
    /// The JSON value of this response, extracting from the raw text when the
    /// call was made with `expect_json = false`.
    pub fn into_json(self) -> Result<Value, LlmError> {
        match self {
            ModelResponse::Json(value) => Ok(value),
            ModelResponse::Text(text) => extract_json(&text),
        }
    }
}

/// The single Gemini client used by all services.
///
/// Holds the HTTP client, the retry policy, and the overall per-call
/// deadline. The rate limiter is NOT owned here — it is passed into
/// `safe_call` explicitly so the sharing is visible at every call site.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    retry: RetryPolicy,
    call_timeout: Duration,
}

impl GeminiClient {
    pub fn new(api_key: String, retry: RetryPolicy, call_timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            retry,
            call_timeout,
        }
    }

    /// Makes exactly one call to the Gemini API and returns the response text.
    ///
    /// No rate limiting or retry here — `safe_call` layers those on. Non-2xx
    /// statuses become `LlmError::Api` with the upstream message; transient
    /// classification happens downstream in the retry policy.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured upstream message when the body carries one
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let model_response: GenerateContentResponse = response.json().await?;
        let usage = model_response.usage_metadata.as_ref();
        debug!(
            "Gemini call succeeded: input_tokens={}, output_tokens={}",
            usage.map_or(0, |u| u.prompt_token_count),
            usage.map_or(0, |u| u.candidates_token_count)
        );

        model_response.text().ok_or(LlmError::EmptyContent)
    }

    /// The safe entry point used by all request handlers.
    ///
    /// Sequence: await the shared rate limiter, run the remote call under the
    /// retry policy, then pass the text through the JSON extractor when the
    /// caller expects JSON. The whole sequence — limiter wait, backoff sleeps,
    /// HTTP round trips — runs under one overall deadline so a saturated
    /// window cannot hang a request forever. Errors keep their original
    /// classification and message.
    pub async fn safe_call(
        &self,
        limiter: &RateLimiter,
        prompt: &str,
        expect_json: bool,
    ) -> Result<ModelResponse, LlmError> {
        let call = async {
            limiter.wait_if_needed().await;
            let text = with_retry(&self.retry, || self.generate(prompt)).await?;
            if expect_json {
                Ok(ModelResponse::Json(extract_json(&text)?))
            } else {
                Ok(ModelResponse::Text(text))
            }
        };

        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| LlmError::DeadlineExceeded(self.call_timeout))?
    }

    /// Convenience wrapper over `safe_call` for the JSON-expecting endpoints.
    pub async fn safe_call_json(
        &self,
        limiter: &RateLimiter,
        prompt: &str,
    ) -> Result<Value, LlmError> {
        self.safe_call(limiter, prompt, true).await?.into_json()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn generation_config_serializes_with_camel_case_keys() {
        let config = GenerationConfig {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["temperature"], json!(0.7));
        assert_eq!(value["topK"], json!(40));
        assert_eq!(value["topP"], json!(0.95));
        assert_eq!(value["maxOutputTokens"], json!(2048));
    }

    #[test]
    fn request_body_matches_generate_content_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], json!("hello"));
        assert!(value["generationConfig"].is_object());
    }

    #[test]
    fn response_text_concatenates_parts_of_first_candidate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello "}, {"text": "world"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 2}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text().unwrap(), "Hello world");
    }

    #[test]
    fn response_without_candidates_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn upstream_error_body_parses_to_message() {
        let raw = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        let parsed: GeminiError = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.error.message, "Resource has been exhausted");
    }

    #[test]
    fn model_response_text_variant_extracts_json_on_demand() {
        let response = ModelResponse::Text("prefix {\"a\": 1} suffix".to_string());
        assert_eq!(response.into_json().unwrap(), json!({"a": 1}));
    }
}
