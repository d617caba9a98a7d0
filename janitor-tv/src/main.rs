//! janitor-tv - TV library retention for Sonarr
//!
//! `entries` lists the library surface derived from Sonarr's import history.
//! `prune` removes seasons whose canonical import is older than a cutoff.
//! Mutations require both `--apply` and `dry_run = false` in the config.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use janitor_common::config::TomlConfig;
use janitor_common::LibraryService;
use janitor_tv::{select_expired, ServiceSettings, SonarrClient, SonarrService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "janitor-tv", version, about = "Retention for Sonarr-managed TV libraries")]
struct Cli {
    /// Config file (overrides the default search locations)
    #[arg(long, env = "JANITOR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List one library entry per season with a completed import
    Entries {
        /// Print JSON lines instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Remove seasons imported at least N days ago
    Prune {
        #[arg(long)]
        older_than_days: i64,

        /// Perform deletions (otherwise the pass is a dry run)
        #[arg(long)]
        apply: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TomlConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Starting janitor-tv v{}", env!("CARGO_PKG_VERSION"));
    match &config.source {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => warn!("No config file found, using built-in defaults"),
    }
    info!(
        url = %config.sonarr.url,
        dry_run = config.application.dry_run,
        filesystem_access = config.filesystem.access,
        workers = config.application.workers,
        "Configuration loaded"
    );

    let client = SonarrClient::from_config(&config.sonarr)?;
    let service = SonarrService::initialize(Arc::new(client), ServiceSettings::from(&config))
        .await
        .context("Failed to evaluate Sonarr quality profiles")?;

    match cli.command {
        Command::Entries { json } => {
            let entries = service.get_entries().await?;
            for item in &entries {
                if json {
                    println!("{}", serde_json::to_string(item)?);
                } else {
                    println!(
                        "{:>6}  S{:<4}  {}  {}",
                        item.id,
                        item.season.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string()),
                        item.imported_at,
                        item.full_path
                    );
                }
            }
        }
        Command::Prune {
            older_than_days,
            apply,
        } => {
            if apply && config.application.dry_run {
                warn!("--apply given but dry_run is enabled in the configuration; nothing will be deleted");
            }
            let service = service.with_dry_run(config.application.dry_run || !apply);

            let entries = service.get_entries().await?;
            let expired = select_expired(entries, older_than_days, janitor_common::time::local_now());
            info!(
                expired = expired.len(),
                older_than_days,
                "Selected seasons for removal"
            );

            let report = service.remove_entries(&expired).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
