use campus_compass::{
    api::{start_server, ApiState},
    AppConfig, HttpAdvisoryClient,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    info!("🚀 Campus Compass - API Server");
    info!("📍 Port: {}", config.api_port);
    info!("🤖 Advisory service: {}", config.advisory_base_url);

    let client = HttpAdvisoryClient::from_config(&config)?;
    let state = ApiState::new(Arc::new(client));

    info!("📡 Starting API server...");

    start_server(state, config.api_port).await?;

    Ok(())
}
