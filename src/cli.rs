// src/cli.rs
//! CLI definitions for modsync
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modsync")]
#[command(version)]
#[command(about = "Resolve and install mod dependencies for a plugin project", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a project's mod dependencies and install them
    Install {
        /// Path to the project file to query for dependencies
        #[arg(long)]
        project_path: String,

        /// Build configuration passed to the build tool
        #[arg(long, default_value = "Release")]
        project_configuration: String,

        /// Game version to resolve against, overriding the project's value
        #[arg(long)]
        game_version: Option<String>,

        /// Directory mod archives are extracted into
        #[arg(long, default_value = "Refs")]
        path: PathBuf,

        /// JSON object mapping requested mod names to registry names
        #[arg(long, default_value = "{}")]
        aliases: String,

        /// JSON object of extra mod requirements, overriding project ones
        #[arg(long, default_value = "{}")]
        additional_dependencies: String,

        /// JSON object mapping mod names to fallback 'owner/repo' sources
        #[arg(long, default_value = "{}")]
        additional_sources: String,

        /// JSON array of auxiliary project files queried for dependencies
        #[arg(long, default_value = "[]")]
        additional_project_paths: String,

        /// Resolve and log without downloading, extracting or exporting
        #[arg(long)]
        dry_run: bool,
    },
}
