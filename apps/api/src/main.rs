mod chat;
mod classifier;
mod config;
mod errors;
mod income;
mod llm_client;
mod prediction;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classifier::UnavailableClassifier;
use crate::config::Config;
use crate::income::IncomeTable;
use crate::llm_client::{CompletionClient, HttpTransport};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration is validated before anything else; a missing API key stops startup here.
    let config = Config::from_env().context("Invalid configuration")?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hestia API v{}", env!("CARGO_PKG_VERSION"));

    // Income dataset (read-only for the life of the process)
    let incomes = Arc::new(IncomeTable::load(&config.income_data_path)?);

    // Initialize completion client
    let transport = HttpTransport::new(
        config.deepseek_api_url.clone(),
        config.deepseek_api_key.clone(),
    )
    .context("Failed to build HTTP client")?;
    let llm = CompletionClient::new(Arc::new(transport)).with_deadline(config.completion_timeout);
    info!(
        "Completion client initialized (model: {}, deadline: {}s)",
        llm_client::MODEL,
        llm.deadline().as_secs()
    );

    let state = AppState {
        llm,
        incomes,
        classifier: Arc::new(UnavailableClassifier),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
