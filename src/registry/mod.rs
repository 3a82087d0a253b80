// src/registry/mod.rs

//! Primary mod registry
//!
//! This module provides:
//! - Wire types for registry artifacts and their per-platform downloads
//! - An order-preserving candidate fetch for one resolved game version

mod client;

pub use client::{RegistryClient, REGISTRY_BASE_URL};

use crate::pool::Candidate;
use semver::Version;
use serde::Deserialize;

/// Download kind tag for platform-agnostic archives
pub const UNIVERSAL_DOWNLOAD: &str = "universal";

/// One per-platform download link of a registry artifact
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactDownload {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// One artifact published on the registry for a given game version
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryArtifact {
    pub name: String,
    pub version: Version,
    pub downloads: Vec<ArtifactDownload>,
}

impl RegistryArtifact {
    /// Site-relative URL of the universal download, if the artifact has one
    pub fn universal_url(&self) -> Option<&str> {
        self.downloads
            .iter()
            .find(|d| d.kind == UNIVERSAL_DOWNLOAD)
            .map(|d| d.url.as_str())
    }
}

impl Candidate for RegistryArtifact {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> &Version {
        &self.version
    }
}
