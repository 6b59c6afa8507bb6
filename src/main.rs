use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use media_store::{
    api::create_router,
    application::builder::ApplicationBuilder,
    config::{Config, LogFormat},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_tracing(config.log_format);

    info!("Starting media store");

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    info!("Configuration loaded and validated");

    let state = ApplicationBuilder::new(config.clone())
        .with_repository()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize media repository")?
        .with_infrastructure()
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize blob storage")?
        .build()
        .map_err(|e| anyhow::anyhow!(e))?;

    let app = create_router(state);

    info!("Listening on {}", config.listen_addr);
    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_thread_ids(true).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
