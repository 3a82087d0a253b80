// src/fallback/mod.rs

//! Fallback source candidate pools
//!
//! When the registry has no match for a dependency, a configured source
//! repository's release assets are consulted instead. This module provides:
//! - The tagged parser for the `name-version-gv<token>` asset naming
//!   convention
//! - The deterministically ordered candidate pool built from one repository's
//!   assets
//! - The release-listing client and the per-repository lazy pool cache

mod client;

pub use client::{SourceClient, SourcePools, RELEASES_API_BASE};

use crate::catalog::VersionCatalog;
use crate::pool::{self, Candidate};
use semver::{Version, VersionReq};
use tracing::debug;

/// Marker prefixing the game-version token in release-asset filenames
/// (`SongCore-3.4.1-gv1.34.2.zip`)
const GAME_VERSION_MARKER: &str = "gv";

/// Result of parsing a release-asset filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAssetName {
    Parsed {
        name: String,
        version: Version,
        game_version_token: String,
    },
    Malformed,
}

/// Parse a release-asset filename of the form `name-version-gv<token>[.ext]`
///
/// Hyphen-delimited: first segment mod name, second segment mod version,
/// third segment game-version token behind the `gv` marker. Anything else is
/// `Malformed`; such assets are unmatchable but never fail the run.
pub fn parse_asset_name(file_name: &str) -> ParsedAssetName {
    // A trailing `.ext` is not part of the token; a purely numeric suffix is
    // the tail of a dotted version, not an extension.
    let stem = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() && !ext.chars().all(|c| c.is_ascii_digit()) => stem,
        _ => file_name,
    };

    let segments: Vec<&str> = stem.split('-').collect();
    if segments.len() < 3 {
        return ParsedAssetName::Malformed;
    }

    let Ok(version) = Version::parse(segments[1]) else {
        return ParsedAssetName::Malformed;
    };

    let Some(token) = segments[2].strip_prefix(GAME_VERSION_MARKER) else {
        return ParsedAssetName::Malformed;
    };
    if token.is_empty() {
        return ParsedAssetName::Malformed;
    }

    ParsedAssetName::Parsed {
        name: segments[0].to_string(),
        version,
        game_version_token: token.to_string(),
    }
}

/// One downloadable artifact derived from a release asset
///
/// `game_version` is `None` when the embedded token did not resolve through
/// the catalog (or the resolved entry is not semver); the artifact stays in
/// the pool but matches no requirement.
#[derive(Debug, Clone)]
pub struct FallbackArtifact {
    pub name: String,
    pub version: Version,
    pub game_version: Option<Version>,
    pub url: String,
}

impl Candidate for FallbackArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &Version {
        &self.version
    }
}

/// All candidate artifacts of one source repository, in scan order
#[derive(Debug, Default)]
pub struct FallbackPool {
    artifacts: Vec<FallbackArtifact>,
}

impl FallbackPool {
    /// Build a pool from `(file name, download URL)` release assets
    ///
    /// Embedded game-version tokens are resolved through the catalog. The pool
    /// is sorted descending by (game version, artifact version) so the first
    /// structural match is also the most recent compatible one; artifacts with
    /// an unresolved game version sort last. The order is total and does not
    /// depend on the input order.
    pub fn build(
        assets: impl IntoIterator<Item = (String, String)>,
        catalog: &VersionCatalog,
    ) -> Self {
        let mut artifacts = Vec::new();

        for (file_name, url) in assets {
            match parse_asset_name(&file_name) {
                ParsedAssetName::Parsed {
                    name,
                    version,
                    game_version_token,
                } => {
                    let game_version = catalog
                        .resolve_token(&game_version_token)
                        .and_then(|entry| Version::parse(entry).ok());
                    artifacts.push(FallbackArtifact {
                        name,
                        version,
                        game_version,
                        url,
                    });
                }
                ParsedAssetName::Malformed => {
                    debug!("Skipping release asset with unrecognized name '{file_name}'");
                }
            }
        }

        artifacts.sort_by(|a, b| {
            b.game_version
                .cmp(&a.game_version)
                .then_with(|| b.version.cmp(&a.version))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.url.cmp(&b.url))
        });

        Self { artifacts }
    }

    /// First artifact usable for `(name | alias, range)` under the current
    /// game version, in pool order
    ///
    /// An artifact is usable when its game version resolved and is not newer
    /// than the current one, its name equals the requested name or its alias,
    /// and its version satisfies the range.
    pub fn find(
        &self,
        name: &str,
        alias: Option<&str>,
        range: &VersionReq,
        current: &Version,
    ) -> Option<&FallbackArtifact> {
        let compatible = self.artifacts.iter().filter(|artifact| {
            artifact
                .game_version
                .as_ref()
                .is_some_and(|gv| gv <= current)
        });
        pool::first_match(compatible, name, alias, range)
    }

    /// Artifacts in scan order
    pub fn artifacts(&self) -> &[FallbackArtifact] {
        &self.artifacts
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
