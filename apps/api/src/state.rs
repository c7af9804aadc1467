use std::sync::Arc;

use crate::analysis::Analyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds no per-user data: the last result, the chosen sample and the progress
/// stage all live with the caller.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no Gemini credential was configured at startup.
    pub analyzer: Option<Arc<Analyzer>>,
    pub config: Config,
}
