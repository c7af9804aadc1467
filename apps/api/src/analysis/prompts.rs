// Prompt constants for the resume/job comparison.
// The JSON keys below are the wire contract with the model; `result.rs` reads
// exactly these six.

/// Role framing and output rules.
pub const ANALYST_INSTRUCTIONS: &str = "Act as a senior talent analyst and impartial \
    assistant. Compare the resume and the job description below, producing strict JSON \
    with no markdown. The \"analise_profissional\" key must contain neutral observations \
    that help the recruiter decide, without definitive value judgments.";

/// Literal shape the model must fill in.
pub const RESPONSE_FORMAT: &str = r#"{"resumo_geral": "...", "pontuacao_compatibilidade": 0, "pontos_fortes": ["..."], "lacunas": ["..."], "sugestoes": ["..."], "analise_profissional": ["..."]}"#;

/// Builds the full prompt. Deterministic: same inputs, same prompt.
///
/// The resume and job texts are inserted verbatim under the `CURRICULO:` and
/// `VAGA:` labels.
pub fn build_analysis_prompt(resume_text: &str, job_text: &str, language: &str) -> String {
    format!(
        "{ANALYST_INSTRUCTIONS}\n\
         Fixed format: {RESPONSE_FORMAT}\n\
         Fill in only with clear text in {language}.\n\n\
         CURRICULO:\n{resume_text}\n\n\
         VAGA:\n{job_text}"
    )
}
