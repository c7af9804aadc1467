//! Reply validation — turns whatever the model said into a fully-shaped
//! `AnalysisResult`.
//!
//! The reply is never trusted: the first `{` .. last `}` span is parsed, each of
//! the six known keys is merged over the defaults with its own coercion rule, and
//! anything unparseable degrades to the all-default record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

pub const KEY_SUMMARY: &str = "resumo_geral";
pub const KEY_SCORE: &str = "pontuacao_compatibilidade";
pub const KEY_STRENGTHS: &str = "pontos_fortes";
pub const KEY_GAPS: &str = "lacunas";
pub const KEY_SUGGESTIONS: &str = "sugestoes";
pub const KEY_PROFESSIONAL_ANALYSIS: &str = "analise_profissional";

/// Structured compatibility assessment. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_summary: String,
    /// Semantically 0 – 100, but not clamped: the model's value is kept.
    pub compatibility_score: i64,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub suggestions: Vec<String>,
    pub professional_analysis: Vec<String>,
}

impl AnalysisResult {
    /// Parses a raw model reply. Never fails: a reply with no usable JSON
    /// object yields `AnalysisResult::default()`.
    pub fn from_reply(reply: &str) -> Self {
        match extract_json_object(reply) {
            Some(parsed) => Self::from_object(&parsed),
            None => {
                warn!("Model reply is not in the expected JSON format. Returning empty result.");
                Self::default()
            }
        }
    }

    /// Merges the known keys of `parsed` over the defaults. Unknown keys are
    /// ignored; absent keys keep their default.
    pub fn from_object(parsed: &Map<String, Value>) -> Self {
        let mut result = Self::default();

        if let Some(v) = parsed.get(KEY_SUMMARY) {
            result.overall_summary = coerce_text(v);
        }
        if let Some(v) = parsed.get(KEY_SCORE) {
            result.compatibility_score = coerce_score(v);
        }
        if let Some(v) = parsed.get(KEY_STRENGTHS) {
            result.strengths = coerce_list(v);
        }
        if let Some(v) = parsed.get(KEY_GAPS) {
            result.gaps = coerce_list(v);
        }
        if let Some(v) = parsed.get(KEY_SUGGESTIONS) {
            result.suggestions = coerce_list(v);
        }
        if let Some(v) = parsed.get(KEY_PROFESSIONAL_ANALYSIS) {
            result.professional_analysis = coerce_list(v);
        }

        result
    }
}

/// Finds the first `{` and the last `}` in the reply and parses that span as a
/// JSON object. Returns `None` for blank replies, missing braces, invalid JSON
/// or JSON that is not an object.
pub fn extract_json_object(reply: &str) -> Option<Map<String, Value>> {
    let reply = reply.trim();
    if reply.is_empty() {
        return None;
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end <= start {
        return None;
    }

    match serde_json::from_str::<Value>(&reply[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            error!("Failed to decode model JSON: {e}");
            None
        }
    }
}

/// A string stays as-is; numbers and booleans are rendered as text; anything
/// else becomes empty.
fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Integers are kept unclamped, fractional numbers are truncated, numeric
/// strings are parsed. Anything else falls back to 0.
fn coerce_score(value: &Value) -> i64 {
    let score = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim().trim_end_matches('%').trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
        }
        _ => None,
    };

    score.unwrap_or_else(|| {
        warn!("Compatibility score {value} is not numeric; using 0");
        0
    })
}

/// A list is kept in order; a lone string becomes a one-element list; anything
/// else becomes empty. Non-string elements are rendered as text (null as an
/// empty string), so the list keeps its length and order.
fn coerce_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}
