// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Install {
            project_path,
            project_configuration,
            game_version,
            path,
            aliases,
            additional_dependencies,
            additional_sources,
            additional_project_paths,
            dry_run,
        } => commands::run_install(
            project_path,
            project_configuration,
            game_version,
            path,
            aliases,
            additional_dependencies,
            additional_sources,
            additional_project_paths,
            dry_run,
        ),
    }
}
