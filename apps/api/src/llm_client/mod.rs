/// LLM Client — the single point of entry for all Gemini API calls in Select.ai.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions go through the `LanguageModel` trait defined here.
///
/// One prompt in, one reply out. No streaming, no multi-turn state, no retries:
/// a failed call is reported to the caller as-is.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used when neither an explicit override nor `GEMINI_MODEL` is set.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Gemini API key is missing")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Prompt blocked by the provider: {reason}")]
    Blocked { reason: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Text-in/text-out seam around the remote model.
///
/// Prompt construction and reply validation never see the transport, so a
/// deterministic stub can stand in for Gemini in tests.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends the full prompt as a single user turn and returns the reply text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Identifier of the model answering the prompts.
    fn model_id(&self) -> &str;
}

/// Picks the model identifier: explicit override, then the environment-level
/// default, then `DEFAULT_MODEL`. Blank values count as absent.
pub fn resolve_model(override_model: Option<&str>, env_default: Option<&str>) -> String {
    override_model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .or_else(|| env_default.map(str::trim).filter(|m| !m.is_empty()))
        .unwrap_or(DEFAULT_MODEL)
        .to_string()
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    ///
    /// A reply without candidates is an error only when the provider says why
    /// (a block reason); an empty candidate yields an empty string.
    pub fn into_text(self) -> Result<String, LlmError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => Err(LlmError::Blocked { reason }),
                None => Ok(String::new()),
            };
        };

        if let Some(reason) = candidate.finish_reason.as_deref().filter(|r| *r != "STOP") {
            debug!("Gemini candidate finished with reason {reason}");
        }

        Ok(candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default())
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

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Builds a client for `model`. Fails before any network activity if the
    /// key is blank.
    pub fn new(api_key: &str, model: String) -> Result<Self, LlmError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        Ok(Self {
            client: Client::builder().build()?,
            api_key: api_key.to_string(),
            model,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        })
    }

    /// Points the client at another endpoint root (proxies, regional hosts).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let body = parse_generate_response(&response.text().await?)?;
        if let Some(usage) = &body.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        body.into_text()
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

/// Decodes a successful `generateContent` body.
fn parse_generate_response(body: &str) -> Result<GenerateContentResponse, LlmError> {
    Ok(serde_json::from_str(body)?)
}

/// Pulls the human-readable message out of a Gemini error body, falling back to
/// the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
