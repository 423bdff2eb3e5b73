use std::error::Error;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file, if present.
    // Containerized deployments pass env directly.
    if dotenvy::dotenv().is_err() {
        eprintln!("no .env file found, using process environment");
    }

    let filter = rag_gateway::telemetry::env_filter_with_level("info", Level::INFO);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    api::start().await?;

    Ok(())
}
