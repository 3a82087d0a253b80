// src/config/mod.rs

//! Typed configuration inputs
//!
//! The JSON-shaped options (aliases, additional dependencies, additional
//! sources, additional project paths) are validated into typed mappings up
//! front, so resolution logic never sees untyped values.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// An `owner/repo` source repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId {
    pub owner: String,
    pub repo: String,
}

impl FromStr for SourceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(Error::ConfigError(format!(
                "Invalid source repository '{s}', expected 'owner/repo'"
            ))),
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Parse a JSON object option into a name -> string map
pub fn parse_json_map(input: &str, option: &str) -> Result<BTreeMap<String, String>> {
    serde_json::from_str(input).map_err(|e| {
        Error::ConfigError(format!(
            "Option '{option}' is not a JSON object of strings: {e}"
        ))
    })
}

/// Parse a JSON array option into a list of strings
pub fn parse_json_list(input: &str, option: &str) -> Result<Vec<String>> {
    serde_json::from_str(input).map_err(|e| {
        Error::ConfigError(format!(
            "Option '{option}' is not a JSON array of strings: {e}"
        ))
    })
}

/// Parse the additional-sources option into source repository identifiers
pub fn parse_source_map(input: &str, option: &str) -> Result<BTreeMap<String, SourceId>> {
    parse_json_map(input, option)?
        .into_iter()
        .map(|(name, source)| Ok((name, source.parse()?)))
        .collect()
}

/// Validated configuration for one install run
#[derive(Debug)]
pub struct InstallOptions {
    pub project_path: String,
    pub project_configuration: String,
    pub game_version: Option<String>,
    pub install_dir: PathBuf,
    pub aliases: BTreeMap<String, String>,
    pub additional_dependencies: BTreeMap<String, String>,
    pub additional_sources: BTreeMap<String, SourceId>,
    pub additional_project_paths: Vec<String>,
}

impl InstallOptions {
    /// Validate the raw JSON-shaped CLI options into typed mappings
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        project_path: String,
        project_configuration: String,
        game_version: Option<String>,
        install_dir: PathBuf,
        aliases: &str,
        additional_dependencies: &str,
        additional_sources: &str,
        additional_project_paths: &str,
    ) -> Result<Self> {
        Ok(Self {
            project_path,
            project_configuration,
            game_version,
            install_dir,
            aliases: parse_json_map(aliases, "aliases")?,
            additional_dependencies: parse_json_map(
                additional_dependencies,
                "additional-dependencies",
            )?,
            additional_sources: parse_source_map(additional_sources, "additional-sources")?,
            additional_project_paths: parse_json_list(
                additional_project_paths,
                "additional-project-paths",
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_id_parse() {
        let id: SourceId = "nicoco007/BeatSaberMarkupLanguage".parse().unwrap();
        assert_eq!(id.owner, "nicoco007");
        assert_eq!(id.repo, "BeatSaberMarkupLanguage");
        assert_eq!(id.to_string(), "nicoco007/BeatSaberMarkupLanguage");
    }

    #[test]
    fn test_source_id_rejects_bad_shapes() {
        assert!("norepo".parse::<SourceId>().is_err());
        assert!("/repo".parse::<SourceId>().is_err());
        assert!("owner/".parse::<SourceId>().is_err());
        assert!("a/b/c".parse::<SourceId>().is_err());
        assert!("".parse::<SourceId>().is_err());
    }

    #[test]
    fn test_parse_json_map() {
        let map = parse_json_map(r#"{"SongCore": "^3.0.0"}"#, "aliases").unwrap();
        assert_eq!(map.get("SongCore").map(String::as_str), Some("^3.0.0"));
    }

    #[test]
    fn test_parse_json_map_rejects_non_object() {
        assert!(parse_json_map("[]", "aliases").is_err());
        assert!(parse_json_map(r#"{"a": 1}"#, "aliases").is_err());
        assert!(parse_json_map("not json", "aliases").is_err());
    }

    #[test]
    fn test_parse_json_list() {
        let list = parse_json_list(r#"["a/b.csproj", "c/d.csproj"]"#, "paths").unwrap();
        assert_eq!(list, vec!["a/b.csproj", "c/d.csproj"]);
    }

    #[test]
    fn test_parse_json_list_rejects_non_array() {
        assert!(parse_json_list("{}", "paths").is_err());
        assert!(parse_json_list(r#"[1, 2]"#, "paths").is_err());
    }

    #[test]
    fn test_parse_source_map() {
        let map = parse_source_map(r#"{"Foo": "org/foo"}"#, "additional-sources").unwrap();
        let id = map.get("Foo").unwrap();
        assert_eq!(id.owner, "org");
        assert_eq!(id.repo, "foo");
    }

    #[test]
    fn test_parse_source_map_rejects_bad_repo() {
        assert!(parse_source_map(r#"{"Foo": "just-a-name"}"#, "additional-sources").is_err());
    }

    #[test]
    fn test_install_options_from_raw() {
        let options = InstallOptions::from_raw(
            "MyMod.csproj".to_string(),
            "Release".to_string(),
            None,
            PathBuf::from("Refs"),
            r#"{"SongCoreLegacy": "SongCore"}"#,
            r#"{"Extra": "^1.0.0"}"#,
            r#"{"Foo": "org/foo"}"#,
            r#"["Aux/Aux.csproj"]"#,
        )
        .unwrap();

        assert_eq!(options.aliases["SongCoreLegacy"], "SongCore");
        assert_eq!(options.additional_dependencies["Extra"], "^1.0.0");
        assert_eq!(options.additional_sources["Foo"].repo, "foo");
        assert_eq!(options.additional_project_paths, vec!["Aux/Aux.csproj"]);
    }

    #[test]
    fn test_install_options_rejects_bad_sources() {
        let result = InstallOptions::from_raw(
            "MyMod.csproj".to_string(),
            "Release".to_string(),
            None,
            PathBuf::from("Refs"),
            "{}",
            "{}",
            r#"{"Foo": "no-slash"}"#,
            "[]",
        );
        assert!(result.is_err());
    }
}
