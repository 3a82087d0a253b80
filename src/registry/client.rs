// src/registry/client.rs

//! Registry search client
//!
//! Issues the single candidate-pool query for a resolved game version. The
//! registry returns artifacts sorted by version descending; that order is
//! preserved verbatim, which is what makes first-match-wins resolution pick
//! the highest compatible version.

use crate::error::Result;
use crate::http::HttpClient;
use crate::registry::RegistryArtifact;
use tracing::info;

/// Base URL of the mod registry; download paths in its payloads are relative
/// to this.
pub const REGISTRY_BASE_URL: &str = "https://beatmods.com";

/// Client for the registry search endpoint
pub struct RegistryClient<'a> {
    http: &'a HttpClient,
    base_url: String,
}

impl<'a> RegistryClient<'a> {
    /// Create a client against the default registry
    pub fn new(http: &'a HttpClient) -> Self {
        Self::with_base_url(http, REGISTRY_BASE_URL)
    }

    /// Create a client against a specific registry base URL
    pub fn with_base_url(http: &'a HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch all artifacts compatible with `game_version`, registry order
    /// preserved
    ///
    /// A non-success status or malformed payload is fatal for the run.
    pub fn fetch_candidates(&self, game_version: &str) -> Result<Vec<RegistryArtifact>> {
        info!("Fetching mods for game version '{game_version}'");

        let url = format!("{}/api/v1/mod", self.base_url);
        let artifacts: Vec<RegistryArtifact> = self.http.get_json_with_query(
            &url,
            &[
                ("sort", "version"),
                ("sortDirection", "-1"),
                ("gameVersion", game_version),
            ],
        )?;

        info!("Registry returned {} candidate artifacts", artifacts.len());
        Ok(artifacts)
    }

    /// Join a registry-relative download path onto the base URL
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
