mod config;
mod metrics;
mod routes;

use anyhow::{Context, Result};
use retriever::GradientKbRetriever;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let retriever = GradientKbRetriever::new(config.retriever.clone())
        .context("Invalid knowledge base configuration")?;

    let app = routes::router(AppState::new(retriever));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        knowledge_base_id = %config.retriever.knowledge_base_id,
        num_results = config.retriever.num_results,
        "Server listening"
    );

    axum::serve(listener, app).await.context("Server terminated")?;

    Ok(())
}
