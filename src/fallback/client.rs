// src/fallback/client.rs

//! Release-asset listing for fallback source repositories
//!
//! Enumerates the published release assets of an `owner/repo` source and
//! flattens them into a candidate pool. Pools are built lazily and at most
//! once per repository per run.

use crate::catalog::VersionCatalog;
use crate::config::SourceId;
use crate::error::Result;
use crate::fallback::FallbackPool;
use crate::http::HttpClient;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::info;

/// Base URL of the release-listing API
pub const RELEASES_API_BASE: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

/// Client for the per-repository release-listing endpoint
pub struct SourceClient<'a> {
    http: &'a HttpClient,
    base_url: String,
}

impl<'a> SourceClient<'a> {
    /// Create a client against the default release-listing API
    pub fn new(http: &'a HttpClient) -> Self {
        Self::with_base_url(http, RELEASES_API_BASE)
    }

    /// Create a client against a specific API base URL
    pub fn with_base_url(http: &'a HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Enumerate every release asset of `source` and build its candidate pool
    pub fn list_candidates(
        &self,
        source: &SourceId,
        catalog: &VersionCatalog,
    ) -> Result<FallbackPool> {
        info!("Listing release assets from '{source}'");

        let url = format!(
            "{}/repos/{}/{}/releases",
            self.base_url, source.owner, source.repo
        );
        let releases: Vec<Release> = self.http.get_json(&url)?;

        let assets = releases
            .into_iter()
            .flat_map(|release| release.assets)
            .map(|asset| (asset.name, asset.browser_download_url));

        let pool = FallbackPool::build(assets, catalog);
        info!("Source '{source}' offers {} candidate artifacts", pool.artifacts().len());
        Ok(pool)
    }
}

/// Per-repository pool cache for one run
///
/// Pools are fetched on first need and reused for every later requirement
/// that names the same source repository.
pub struct SourcePools<'a> {
    client: SourceClient<'a>,
    pools: HashMap<SourceId, FallbackPool>,
}

impl<'a> SourcePools<'a> {
    pub fn new(client: SourceClient<'a>) -> Self {
        Self {
            client,
            pools: HashMap::new(),
        }
    }

    /// The pool for `source`, fetching it on first use
    pub fn pool_for(
        &mut self,
        source: &SourceId,
        catalog: &VersionCatalog,
    ) -> Result<&FallbackPool> {
        if !self.pools.contains_key(source) {
            let pool = self.client.list_candidates(source, catalog)?;
            self.pools.insert(source.clone(), pool);
        }

        Ok(&self.pools[source])
    }

    /// Seed a pool without fetching (warm caches and tests)
    pub fn insert(&mut self, source: SourceId, pool: FallbackPool) {
        self.pools.insert(source, pool);
    }
}
