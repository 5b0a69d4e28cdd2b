use anyhow::Result;
use clap::Command;
use meshview_api::{bootstrap::build_api_server, config::AppConfig};
use meshview_observability::{TracingConfig, setup_tracing};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let _matches = Command::new("meshview-api")
        .about("Mesh namespace and validation summary API")
        .version(env!("CARGO_PKG_VERSION"))
        .get_matches();

    let config = AppConfig::load_from_env()?;

    let logging = config.logging();
    setup_tracing(TracingConfig::new(
        "meshview-api",
        &logging.level,
        &logging.format,
    ))?;

    info!("Loaded configuration from environment variables");

    let server = build_api_server(&config).await?;

    info!("Starting meshview API server...");
    if let Err(e) = server.serve().await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
