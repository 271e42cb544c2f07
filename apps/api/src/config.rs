use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent key does not prevent startup; launch endpoints fail per request
    /// with a config error instead, matching the per-request credential check
    /// of the route layer.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
    pub llm_call_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            rate_limit_max_requests: env_or("RATE_LIMIT_MAX_REQUESTS", "15")
                .parse()
                .context("RATE_LIMIT_MAX_REQUESTS must be a positive integer")?,
            rate_limit_window: Duration::from_millis(
                env_or("RATE_LIMIT_WINDOW_MS", "60000")
                    .parse()
                    .context("RATE_LIMIT_WINDOW_MS must be a duration in milliseconds")?,
            ),
            llm_call_timeout: Duration::from_secs(
                env_or("LLM_CALL_TIMEOUT_SECS", "120")
                    .parse()
                    .context("LLM_CALL_TIMEOUT_SECS must be a duration in seconds")?,
            ),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
