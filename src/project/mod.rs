// src/project/mod.rs

//! Build-tool project queries
//!
//! Runs the .NET build tool in structured-output mode to read a project's
//! reported game version, plugin id and declared mod dependencies. A failing
//! build tool aborts the run with its stderr surfaced verbatim.

use crate::error::{Error, Result};
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::process::Command;
use tracing::{debug, warn};

/// Metadata one project reports through the build tool
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub game_version: Option<String>,
    pub plugin_id: Option<String>,
    pub dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct BuildOutput {
    #[serde(rename = "Properties")]
    properties: BuildProperties,
    #[serde(rename = "Items", default)]
    items: BuildItems,
}

#[derive(Debug, Deserialize)]
struct BuildProperties {
    #[serde(rename = "GameVersion", default)]
    game_version: String,
    #[serde(rename = "PluginId", default)]
    plugin_id: String,
}

#[derive(Debug, Default, Deserialize)]
struct BuildItems {
    #[serde(rename = "DependsOn", default)]
    depends_on: Vec<DependsOnItem>,
}

#[derive(Debug, Deserialize)]
struct DependsOnItem {
    #[serde(rename = "Identity")]
    identity: String,
    #[serde(rename = "Version", default)]
    version: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Parse the build tool's structured-output payload
fn parse_build_output(stdout: &str) -> Result<ProjectInfo> {
    let output: BuildOutput = serde_json::from_str(stdout)
        .map_err(|e| Error::ParseError(format!("Malformed build tool output: {e}")))?;

    let mut dependencies = BTreeMap::new();
    for item in output.items.depends_on {
        match item.version {
            Some(version) => {
                dependencies.insert(item.identity, version);
            }
            None => warn!("Dependency '{}' declares no version range; skipping", item.identity),
        }
    }

    Ok(ProjectInfo {
        game_version: non_empty(output.properties.game_version),
        plugin_id: non_empty(output.properties.plugin_id),
        dependencies,
    })
}

/// Query one project's metadata through `dotnet build`
pub fn query_project(path: &str, configuration: &str) -> Result<ProjectInfo> {
    debug!("Querying project '{path}' ({configuration})");

    let output = Command::new("dotnet")
        .args([
            "build",
            path,
            "-c",
            configuration,
            "-getProperty:GameVersion",
            "-getProperty:PluginId",
            "-getItem:DependsOn",
        ])
        .output()
        .map_err(|e| {
            Error::BuildToolError(format!("Failed to run dotnet: {e}. Is the .NET SDK installed?"))
        })?;

    if !output.status.success() {
        return Err(Error::BuildToolError(format!(
            "dotnet build failed for '{path}': {}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    parse_build_output(&String::from_utf8_lossy(&output.stdout))
}

/// Query several projects concurrently, preserving input order
pub fn query_projects(paths: &[String], configuration: &str) -> Result<Vec<ProjectInfo>> {
    paths
        .par_iter()
        .map(|path| query_project(path, configuration))
        .collect()
}
