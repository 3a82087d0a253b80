// src/resolver/mod.rs

//! Mod requirement resolution
//!
//! Resolves each merged requirement to a concrete downloadable artifact.
//! The registry pool for the resolved game version is scanned first in its
//! server-given order, so the first in-range hit is the highest compatible
//! version. Requirements the registry cannot satisfy fall through to their
//! configured fallback source repository, if any.

use crate::catalog::VersionCatalog;
use crate::config::SourceId;
use crate::error::Result;
use crate::fallback::SourcePools;
use crate::pool;
use crate::registry::{RegistryArtifact, RegistryClient};
use semver::{Version, VersionReq};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

/// Package injected by the runtime itself and never installed as a mod
pub const CORE_RUNTIME_PACKAGE: &str = "BSIPA";

/// Names that must never be resolved or installed
///
/// Always contains the core runtime package; the orchestrator adds the
/// project's own plugin id so a mod never depends on itself.
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        let mut names = HashSet::new();
        names.insert(CORE_RUNTIME_PACKAGE.to_string());
        Self { names }
    }

    /// Add a name to the set; re-adding is a no-op
    pub fn add(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge requirement maps in increasing precedence order
///
/// Auxiliary project manifests are weakest, the primary project overrides
/// them, and manual additions override everything. Later writers win per
/// name; the result iterates in name order.
pub fn merge_requirements(
    auxiliary: &[BTreeMap<String, String>],
    primary: &BTreeMap<String, String>,
    manual: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for map in auxiliary {
        merged.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged.extend(primary.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged.extend(manual.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Where a resolved artifact comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Registry,
    Source(String),
}

/// One requirement resolved to a concrete artifact
#[derive(Debug, Clone)]
pub struct ResolvedMod {
    /// Requested name, kept for logs even when an alias matched
    pub name: String,
    pub version: Version,
    pub url: String,
    pub origin: Origin,
}

/// Outcome of resolving one non-excluded requirement
#[derive(Debug)]
pub enum ResolutionOutcome {
    Resolved(ResolvedMod),
    /// No candidate anywhere satisfies the range
    NoMatch,
    /// A registry artifact matched but carries no universal download
    NoUniversalDownload,
}

/// Resolves requirements against the registry pool and fallback sources
pub struct Resolver<'a> {
    registry: &'a RegistryClient<'a>,
    primary_pool: &'a [RegistryArtifact],
    catalog: &'a VersionCatalog,
    game_version: &'a str,
    game_semver: Option<Version>,
    aliases: &'a BTreeMap<String, String>,
    sources: &'a BTreeMap<String, SourceId>,
    exclusions: &'a ExclusionSet,
    pools: SourcePools<'a>,
}

impl<'a> Resolver<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: &'a RegistryClient<'a>,
        primary_pool: &'a [RegistryArtifact],
        catalog: &'a VersionCatalog,
        game_version: &'a str,
        aliases: &'a BTreeMap<String, String>,
        sources: &'a BTreeMap<String, SourceId>,
        exclusions: &'a ExclusionSet,
        pools: SourcePools<'a>,
    ) -> Self {
        Self {
            registry,
            primary_pool,
            catalog,
            game_version,
            game_semver: Version::parse(game_version).ok(),
            aliases,
            sources,
            exclusions,
            pools,
        }
    }

    /// Resolve one requirement
    ///
    /// Returns `Ok(None)` for excluded names. Unparseable ranges resolve to
    /// [`ResolutionOutcome::NoMatch`] with a warning rather than aborting the
    /// run.
    pub fn resolve(&mut self, name: &str, range: &str) -> Result<Option<ResolutionOutcome>> {
        if self.exclusions.contains(name) {
            return Ok(None);
        }

        let requirement = match VersionReq::parse(range) {
            Ok(requirement) => requirement,
            Err(e) => {
                warn!("Ignoring mod '{name}' with unparseable version range '{range}': {e}");
                return Ok(Some(ResolutionOutcome::NoMatch));
            }
        };

        let alias = self.aliases.get(name).map(String::as_str);

        if let Some(artifact) = pool::first_match(self.primary_pool, name, alias, &requirement) {
            return match artifact.universal_url() {
                Some(path) => Ok(Some(ResolutionOutcome::Resolved(ResolvedMod {
                    name: name.to_string(),
                    version: artifact.version.clone(),
                    url: self.registry.absolute_url(path),
                    origin: Origin::Registry,
                }))),
                None => Ok(Some(ResolutionOutcome::NoUniversalDownload)),
            };
        }

        let Some(source) = self.sources.get(name) else {
            return Ok(Some(ResolutionOutcome::NoMatch));
        };

        let Some(current) = self.game_semver.as_ref() else {
            debug!(
                "Game version '{}' is not semver; skipping fallback scan for '{name}'",
                self.game_version
            );
            return Ok(Some(ResolutionOutcome::NoMatch));
        };

        let pool = self.pools.pool_for(source, self.catalog)?;
        match pool.find(name, alias, &requirement, current) {
            Some(artifact) => Ok(Some(ResolutionOutcome::Resolved(ResolvedMod {
                name: name.to_string(),
                version: artifact.version.clone(),
                url: artifact.url.clone(),
                origin: Origin::Source(source.to_string()),
            }))),
            None => Ok(Some(ResolutionOutcome::NoMatch)),
        }
    }
}
