// src/installer/mod.rs

//! Artifact download and extraction
//!
//! Downloads a resolved artifact archive and unpacks it into the install
//! directory, preserving the archive's relative layout. Any download or
//! extraction failure aborts the run.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};
use zip::ZipArchive;

/// Unpack a zip archive body into `dest`, returning the number of files written
///
/// Directory placeholder entries are skipped; their contents recreate the
/// directories. Entries whose paths would escape `dest` are rejected.
pub fn extract_archive(bytes: &[u8], dest: &Path) -> Result<usize> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| Error::ExtractError(format!("Failed to open archive: {e}")))?;

    fs::create_dir_all(dest)
        .map_err(|e| Error::IoError(format!("Failed to create '{}': {e}", dest.display())))?;

    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| Error::ExtractError(format!("Failed to read archive entry: {e}")))?;

        if entry.name().ends_with('/') {
            continue;
        }

        let relative = entry.enclosed_name().ok_or_else(|| {
            Error::ExtractError(format!("Unsafe path in archive: '{}'", entry.name()))
        })?;
        let out_path = dest.join(relative);

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::IoError(format!("Failed to create '{}': {e}", parent.display()))
            })?;
        }

        let mut out = fs::File::create(&out_path)
            .map_err(|e| Error::IoError(format!("Failed to create '{}': {e}", out_path.display())))?;
        std::io::copy(&mut entry, &mut out)
            .map_err(|e| Error::IoError(format!("Failed to write '{}': {e}", out_path.display())))?;

        debug!("Extracted '{}'", out_path.display());
        written += 1;
    }

    Ok(written)
}

/// Downloads artifact archives into one install directory
pub struct Installer<'a> {
    http: &'a HttpClient,
    install_dir: &'a Path,
}

impl<'a> Installer<'a> {
    pub fn new(http: &'a HttpClient, install_dir: &'a Path) -> Self {
        Self { http, install_dir }
    }

    /// Download `url` and unpack it into the install directory
    pub fn install_from(&self, url: &str) -> Result<()> {
        let bytes = self.http.get_bytes(url)?;
        let count = extract_archive(&bytes, self.install_dir)?;
        info!("Extracted {count} files into '{}'", self.install_dir.display());
        Ok(())
    }
}
