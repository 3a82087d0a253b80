// src/env_file.rs

//! Environment-export file append
//!
//! Publishes the install directory to later build steps by appending
//! `name=value` lines to the CI environment file. Both historical variable
//! names point at the same directory.

use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Variable names exported for the install directory
pub const INSTALL_DIR_VARS: [&str; 2] = ["BeatSaberDir", "GameDirectory"];

/// Append the install-directory exports to `env_file`
pub fn append_install_dir(env_file: &Path, dir: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(env_file)
        .map_err(|e| {
            Error::IoError(format!("Failed to open '{}': {e}", env_file.display()))
        })?;

    for var in INSTALL_DIR_VARS {
        writeln!(file, "{var}={}", dir.display())
            .map_err(|e| Error::IoError(format!("Failed to write '{}': {e}", env_file.display())))?;
    }

    info!("Exported install directory '{}'", dir.display());
    Ok(())
}
