//! spam-api: HTTP spam classification service

use spam_api::{ApiConfig, ApiServer};
use spam_rs::Predictor;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spam_api=info,spam_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting spam-api v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = if let Some(config_path) = std::env::args().nth(1) {
        info!("Loading configuration from {}", config_path);
        ApiConfig::from_file(Path::new(&config_path))?
    } else {
        info!("No config file specified, using defaults");
        ApiConfig::default()
    };

    let predictor = Arc::new(Predictor::load(&config.artifacts));

    let server = ApiServer::new(config, predictor);
    server.run().await?;

    Ok(())
}
