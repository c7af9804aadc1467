mod analysis;
mod config;
mod errors;
mod extract;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Select.ai API v{}", env!("CARGO_PKG_VERSION"));

    let analyzer = build_analyzer(&config);

    let state = AppState {
        analyzer,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The service stays up without a key; analysis requests then answer 503.
fn build_analyzer(config: &Config) -> Option<Arc<Analyzer>> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        warn!("GEMINI_API_KEY not set; analysis is disabled until it is configured");
        return None;
    };

    match Analyzer::connect(
        api_key,
        None,
        config.gemini_model.as_deref(),
        &config.gemini_api_url,
        &config.response_language,
    ) {
        Ok(analyzer) => {
            info!("Analyzer initialized (model: {})", analyzer.model_id());
            Some(Arc::new(analyzer))
        }
        Err(e) => {
            error!("Failed to initialize analyzer: {e}");
            None
        }
    }
}
