use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::result::AnalysisResult;
use crate::llm_client::{resolve_model, GeminiClient, LanguageModel, LlmError};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Gemini API key is missing")]
    MissingCredential,

    #[error("Remote model call failed: {0}")]
    RemoteCallFailed(#[source] LlmError),
}

impl From<LlmError> for AnalysisError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingCredential => AnalysisError::MissingCredential,
            other => AnalysisError::RemoteCallFailed(other),
        }
    }
}

/// Compares a resume against a job description through one model call.
///
/// Stateless apart from the configured model and answer language: every
/// `analyze` is an independent round trip with no retained history.
#[derive(Clone)]
pub struct Analyzer {
    model: Arc<dyn LanguageModel>,
    language: String,
}

impl Analyzer {
    pub fn new(model: Arc<dyn LanguageModel>, language: impl Into<String>) -> Self {
        Self {
            model,
            language: language.into(),
        }
    }

    /// Builds a Gemini-backed analyzer.
    ///
    /// Fails with `MissingCredential` on a blank key. The model id is the
    /// override if given, else `env_model`, else the built-in default.
    pub fn connect(
        api_key: &str,
        model_override: Option<&str>,
        env_model: Option<&str>,
        base_url: &str,
        language: &str,
    ) -> Result<Self, AnalysisError> {
        let model_id = resolve_model(model_override, env_model);
        let client = GeminiClient::new(api_key, model_id)?.with_base_url(base_url);
        Ok(Self::new(Arc::new(client), language))
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Runs one comparison. Transport and provider failures propagate as
    /// `RemoteCallFailed`; a reply that cannot be parsed is not an error and
    /// yields the default result.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_analysis_prompt(resume_text, job_text, &self.language);
        info!(
            "Sending comparison to {} (resume: {} chars, job: {} chars)",
            self.model.model_id(),
            resume_text.len(),
            job_text.len()
        );

        let reply = self
            .model
            .generate(&prompt)
            .await
            .map_err(AnalysisError::RemoteCallFailed)?;
        info!("Model reply received with {} chars", reply.len());

        Ok(AnalysisResult::from_reply(&reply))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Deterministic stand-in for the remote model. Records every prompt.
    pub(crate) struct StubModel {
        reply: Result<String, u16>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubModel {
        pub(crate) fn replying(reply: &str) -> Self {
            Self {
                reply: Ok(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LanguageModel for StubModel {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "quota exceeded".to_string(),
                }),
            }
        }

        fn model_id(&self) -> &str {
            "stub-model"
        }
    }

    fn analyzer_with(stub: Arc<StubModel>) -> Analyzer {
        Analyzer::new(stub, "English")
    }

    #[tokio::test]
    async fn test_analyze_parses_reply() {
        let stub = Arc::new(StubModel::replying(
            r#"{"resumo_geral":"ok","pontuacao_compatibilidade":80,"pontos_fortes":"Python","lacunas":[],"sugestoes":[],"analise_profissional":[]}"#,
        ));
        let result = analyzer_with(stub).analyze("resume", "job").await.unwrap();
        assert_eq!(result.compatibility_score, 80);
        assert_eq!(result.strengths, vec!["Python".to_string()]);
        assert_eq!(result.overall_summary, "ok");
    }

    #[tokio::test]
    async fn test_analyze_degrades_on_prose_and_empty_replies() {
        for reply in ["not json at all", "", "   "] {
            let stub = Arc::new(StubModel::replying(reply));
            let result = analyzer_with(stub).analyze("resume", "job").await.unwrap();
            assert_eq!(result, AnalysisResult::default(), "reply {reply:?}");
        }
    }

    #[tokio::test]
    async fn test_analyze_sends_exactly_one_prompt_with_both_texts() {
        let stub = Arc::new(StubModel::replying("{}"));
        analyzer_with(stub.clone())
            .analyze("Rust engineer, 5 years", "Senior Rust role")
            .await
            .unwrap();

        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            build_analysis_prompt("Rust engineer, 5 years", "Senior Rust role", "English")
        );
    }

    #[tokio::test]
    async fn test_remote_failure_propagates_without_retry() {
        let stub = Arc::new(StubModel::failing(429));
        let err = analyzer_with(stub.clone())
            .analyze("resume", "job")
            .await
            .unwrap_err();

        match err {
            AnalysisError::RemoteCallFailed(LlmError::Api { status, .. }) => {
                assert_eq!(status, 429)
            }
            other => panic!("expected RemoteCallFailed, got {other:?}"),
        }
        assert_eq!(stub.prompts.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_connect_without_key_is_missing_credential() {
        let err = Analyzer::connect("", None, None, crate::llm_client::DEFAULT_API_BASE_URL, "English")
            .err();
        assert!(matches!(err, Some(AnalysisError::MissingCredential)));
    }

    #[test]
    fn test_connect_resolves_model_id() {
        let base = crate::llm_client::DEFAULT_API_BASE_URL;
        let analyzer =
            Analyzer::connect("key", Some("gemini-2.5-pro"), Some("env-model"), base, "English")
                .unwrap();
        assert_eq!(analyzer.model_id(), "gemini-2.5-pro");

        let analyzer = Analyzer::connect("key", None, Some("env-model"), base, "English").unwrap();
        assert_eq!(analyzer.model_id(), "env-model");

        let analyzer = Analyzer::connect("key", None, None, base, "English").unwrap();
        assert_eq!(analyzer.model_id(), crate::llm_client::DEFAULT_MODEL);
    }
}
