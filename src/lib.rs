pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod metrics;
pub mod services;
pub mod youtube;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::ingestion::IngestionService;
use crate::services::server::ServerService;
use crate::services::snapshot::SnapshotService;
use crate::youtube::YouTubeClient;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command.unwrap_or_default()
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?;
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_ingest(channel_name: &str) -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.database)?;
    database::setup::ensure_pool_schema(&pool)?;
    let platform = YouTubeClient::new(&config.youtube)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(IngestionService::new(&platform, &pool).ingest(channel_name))?;

    println!(
        "{} {} ({})",
        "Ingested".green().bold(),
        outcome.channel_name,
        outcome.channel_id
    );
    println!("  videos written:      {}", outcome.videos_written);
    println!("  median viewership:   {}", outcome.metrics.median_viewership);
    println!(
        "  short / long videos: {} / {}",
        outcome.metrics.short_videos_count, outcome.metrics.long_videos_count
    );
    Ok(())
}

pub fn handle_snapshot() -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.database)?;
    database::setup::ensure_pool_schema(&pool)?;
    let platform = YouTubeClient::new(&config.youtube)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let written = runtime.block_on(SnapshotService::new(&platform, &pool).run())?;

    println!("{} {} statistics rows", "Recorded".green().bold(), written);
    Ok(())
}

pub fn handle_setup() -> Result<()> {
    let config = AppConfig::from_env()?;
    let pool = database::create_pool(&config.database)?;
    let created = database::setup::ensure_pool_schema(&pool)?;

    if created {
        println!("{} schema in {}", "Created".green().bold(), config.database.path);
    } else {
        println!("Schema already present in {}", config.database.path);
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
