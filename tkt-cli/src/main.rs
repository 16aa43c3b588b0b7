//! tkt - Event ticketing record-keeper
//!
//! Interactive text menu for creating events, booking and cancelling
//! tickets, and browsing attendees. State lives in a local SQLite file.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tkt_cli::{Args, DatabaseTarget, Menu};
use tkt_common::config::TomlConfig;
use tkt_common::db::{init_database, init_memory_database};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(args.log_level.as_deref(), config.log_level.as_deref());

    info!(
        "Starting tkt v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db = match args.database_target(&config) {
        DatabaseTarget::Memory => {
            info!("Using in-memory database");
            init_memory_database()
                .await
                .context("Failed to create in-memory database")?
        }
        DatabaseTarget::File(db_path) => {
            info!("Database path: {}", db_path.display());
            init_database(&db_path, &config.storage())
                .await
                .with_context(|| format!("Failed to open database {}", db_path.display()))?
        }
    };

    let stdin = io::stdin();
    let mut menu = Menu::new(db.clone(), stdin.lock(), io::stdout());
    let outcome = menu.run().await;

    db.close().await;
    outcome.context("Menu terminated")?;

    Ok(())
}

/// Logs go to stderr so they never interleave with the menu on stdout.
///
/// Priority: --log-level, then RUST_LOG, then config `log_level`, then "warn".
fn init_tracing(cli_level: Option<&str>, config_level: Option<&str>) {
    let env_level = std::env::var("RUST_LOG").ok().filter(|s| !s.is_empty());

    let directive = cli_level
        .map(str::to_string)
        .or(env_level)
        .or_else(|| config_level.map(str::to_string))
        .unwrap_or_else(|| "warn".to_string());
    let filter = EnvFilter::new(directive);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
