use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_API_BASE_URL;

/// Language the model is told to answer in when `RESPONSE_LANGUAGE` is unset.
pub const DEFAULT_RESPONSE_LANGUAGE: &str = "Brazilian Portuguese";

/// Upload-boundary cap on the job description text, in characters.
pub const DEFAULT_MAX_JOB_DESCRIPTION_CHARS: usize = 1500;

/// Application configuration loaded from environment variables.
///
/// The Gemini credential is optional here: without it the service still starts,
/// but the analysis endpoint answers 503 until a key is configured.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_api_url: String,
    pub response_language: String,
    pub max_job_description_chars: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL"),
            gemini_api_url: optional_env("GEMINI_API_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            response_language: optional_env("RESPONSE_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_RESPONSE_LANGUAGE.to_string()),
            max_job_description_chars: optional_env("MAX_JOB_DESCRIPTION_CHARS")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_JOB_DESCRIPTION_CHARS must be a non-negative integer")?
                .unwrap_or(DEFAULT_MAX_JOB_DESCRIPTION_CHARS),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an environment variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
