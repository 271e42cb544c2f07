use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppError;
use crate::llm_client::rate_limit::RateLimiter;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when GEMINI_API_KEY is unset. The server still boots; launch
    /// endpoints fail their requests with a config error instead.
    pub llm: Option<GeminiClient>,
    /// The single process-wide outbound rate limiter. Every call path passes
    /// this into `safe_call` — sharing is explicit, not ambient.
    pub limiter: Arc<RateLimiter>,
    #[allow(dead_code)]
    pub config: Config,
}

impl AppState {
    /// The model client, or the config error surfaced to the caller when the
    /// API key is absent.
    pub fn llm(&self) -> Result<&GeminiClient, AppError> {
        self.llm.as_ref().ok_or(AppError::MissingApiKey)
    }
}
