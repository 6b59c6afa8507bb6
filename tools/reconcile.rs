use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use media_store::{
    application::{
        builder::connect_pool,
        ports::{BlobStore, MediaRepository},
        use_cases::ReconcileMediaUseCase,
    },
    config::Config,
    infrastructure::{persistence::PostgresMediaRepository, storage::LocalFilesystemStore},
};

/// Report (and optionally remove) media records without images and images
/// without records
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,

    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Delete dangling records and orphaned images
    #[arg(long)]
    fix: bool,

    /// Ignore images younger than this many minutes
    #[arg(long, default_value_t = 5)]
    grace_minutes: i64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(dir) = cli.public_dir {
        config.public_dir = dir;
    }

    let pool = connect_pool(&config)
        .await
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to connect to database")?;

    let media_repo: Arc<dyn MediaRepository> = Arc::new(PostgresMediaRepository::new(pool));
    let blob_store: Arc<dyn BlobStore> =
        Arc::new(LocalFilesystemStore::new(config.public_dir.clone()));

    let grace_period = chrono::Duration::try_minutes(cli.grace_minutes)
        .with_context(|| format!("--grace-minutes {} is out of range", cli.grace_minutes))?;

    let report = ReconcileMediaUseCase::new(media_repo, blob_store)
        .with_grace_period(grace_period)
        .execute(cli.fix)
        .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Dangling records: {}", report.dangling_records.len());
    for record in &report.dangling_records {
        println!("id: {}, image: {}", record.id(), record.relative_path());
    }

    println!("Orphaned images: {}", report.orphaned_blobs.len());
    for location in &report.orphaned_blobs {
        println!("image: {}", location);
    }

    if report.fixed {
        println!("Fixed: removed all listed entries");
    } else if !report.is_consistent() {
        println!("Run with --fix to remove them");
    }

    Ok(())
}
