// Resume/job comparison: prompt construction, the single model round trip and
// defensive reply parsing. All model calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
pub mod result;
pub mod samples;

pub use analyzer::{AnalysisError, Analyzer};
pub use result::AnalysisResult;
