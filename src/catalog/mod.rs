// src/catalog/mod.rs

//! Game-version catalog and alias resolution
//!
//! A read-only snapshot of the known game versions (most recent first) plus
//! the alias strings considered equal to each entry. Built once per run from
//! the two catalog endpoints and owned for the run's duration.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use std::collections::HashMap;
use tracing::warn;

/// Endpoint returning the ordered list of known game versions
pub const VERSIONS_URL: &str = "https://versions.beatmods.com/versions.json";

/// Endpoint returning the canonical version -> alias list map
pub const ALIASES_URL: &str = "https://alias.beatmods.com/aliases.json";

/// Known game versions with their aliases
pub struct VersionCatalog {
    versions: Vec<String>,
    aliases: HashMap<String, Vec<String>>,
}

impl VersionCatalog {
    /// Build a catalog from an ordered version list and an alias map
    ///
    /// The version list must be ordered most recent first, as the endpoint
    /// returns it.
    pub fn new(versions: Vec<String>, aliases: HashMap<String, Vec<String>>) -> Result<Self> {
        if versions.is_empty() {
            return Err(Error::ParseError(
                "Game version catalog is empty".to_string(),
            ));
        }

        Ok(Self { versions, aliases })
    }

    /// Fetch the catalog snapshot from the catalog endpoints
    pub fn fetch(http: &HttpClient) -> Result<Self> {
        let versions: Vec<String> = http.get_json(VERSIONS_URL)?;
        let aliases: HashMap<String, Vec<String>> = http.get_json(ALIASES_URL)?;
        Self::new(versions, aliases)
    }

    fn matches(&self, entry: &str, requested: &str) -> bool {
        entry == requested
            || self
                .aliases
                .get(entry)
                .is_some_and(|list| list.iter().any(|alias| alias == requested))
    }

    /// The most recent known game version
    pub fn latest(&self) -> &str {
        &self.versions[0]
    }

    /// Resolve a requested game version to a catalog entry
    ///
    /// A request matches an entry when it equals the entry exactly or one of
    /// its aliases. Unknown requests fall back to the most recent entry with a
    /// warning; the caller always gets a usable version.
    pub fn resolve(&self, requested: &str) -> &str {
        match self
            .versions
            .iter()
            .find(|entry| self.matches(entry.as_str(), requested))
        {
            Some(entry) => entry.as_str(),
            None => {
                let latest = self.latest();
                warn!(
                    "Game version '{requested}' doesn't exist; using mods from latest version '{latest}'"
                );
                latest
            }
        }
    }

    /// Resolve a game-version token embedded in a release-asset filename
    ///
    /// Same matching rule as [`resolve`](Self::resolve), but an unknown token
    /// yields `None`: the asset stays in its pool and simply never matches a
    /// requirement, instead of silently becoming the latest version.
    pub fn resolve_token(&self, token: &str) -> Option<&str> {
        self.versions
            .iter()
            .map(String::as_str)
            .find(|&entry| self.matches(entry, token))
    }
}
