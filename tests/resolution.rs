// tests/resolution.rs

//! Integration tests for the resolution pipeline.
//!
//! These tests verify that:
//! 1. Registry payloads parsed from the wire drive first-match-wins resolution
//! 2. Merged requirement maps resolve in deterministic name order
//! 3. Fallback source pools satisfy requirements the registry cannot
//! 4. Exclusions and aliases behave end to end

use modsync::catalog::VersionCatalog;
use modsync::config::SourceId;
use modsync::fallback::{FallbackPool, SourceClient, SourcePools};
use modsync::http::HttpClient;
use modsync::registry::{RegistryArtifact, RegistryClient};
use modsync::resolver::{
    merge_requirements, ExclusionSet, Origin, ResolutionOutcome, Resolver, CORE_RUNTIME_PACKAGE,
};
use semver::Version;
use std::collections::{BTreeMap, HashMap};

fn test_catalog() -> VersionCatalog {
    let versions = vec!["1.34.2".to_string(), "1.34.0".to_string()];
    let mut aliases = HashMap::new();
    aliases.insert("1.34.2".to_string(), vec!["Latest".to_string()]);
    VersionCatalog::new(versions, aliases).unwrap()
}

fn registry_pool() -> Vec<RegistryArtifact> {
    // Shaped like the registry's version-descending search payload
    let payload = r#"
        [
            {
                "name": "SongCore",
                "version": "3.4.1",
                "downloads": [{"type": "universal", "url": "/uploads/songcore-3.4.1.zip"}]
            },
            {
                "name": "SongCore",
                "version": "3.4.0",
                "downloads": [{"type": "universal", "url": "/uploads/songcore-3.4.0.zip"}]
            },
            {
                "name": "BSIPA",
                "version": "4.3.2",
                "downloads": [{"type": "universal", "url": "/uploads/bsipa.zip"}]
            },
            {
                "name": "OculusOnly",
                "version": "1.0.0",
                "downloads": [{"type": "oculus", "url": "/uploads/oculus.zip"}]
            }
        ]
    "#;
    serde_json::from_str(payload).unwrap()
}

struct Harness {
    http: HttpClient,
    catalog: VersionCatalog,
    pool: Vec<RegistryArtifact>,
    aliases: BTreeMap<String, String>,
    sources: BTreeMap<String, SourceId>,
    exclusions: ExclusionSet,
    seeded: Vec<(SourceId, Vec<(String, String)>)>,
}

impl Harness {
    fn new() -> Self {
        Self {
            http: HttpClient::new().unwrap(),
            catalog: test_catalog(),
            pool: registry_pool(),
            aliases: BTreeMap::new(),
            sources: BTreeMap::new(),
            exclusions: ExclusionSet::new(),
            seeded: Vec::new(),
        }
    }

    fn seed_source(&mut self, name: &str, repo: &str, assets: &[(&str, &str)]) {
        let source: SourceId = repo.parse().unwrap();
        self.sources.insert(name.to_string(), source.clone());
        self.seeded.push((
            source,
            assets
                .iter()
                .map(|(n, u)| (n.to_string(), u.to_string()))
                .collect(),
        ));
    }

    fn resolve_all(
        &self,
        requirements: &BTreeMap<String, String>,
    ) -> Vec<(String, Option<ResolutionOutcome>)> {
        let registry = RegistryClient::with_base_url(&self.http, "https://registry.test");
        let client = SourceClient::with_base_url(&self.http, "http://127.0.0.1:1");
        let mut pools = SourcePools::new(client);
        for (source, assets) in &self.seeded {
            pools.insert(
                source.clone(),
                FallbackPool::build(assets.iter().cloned(), &self.catalog),
            );
        }

        let mut resolver = Resolver::new(
            &registry,
            &self.pool,
            &self.catalog,
            "1.34.2",
            &self.aliases,
            &self.sources,
            &self.exclusions,
            pools,
        );

        requirements
            .iter()
            .map(|(name, range)| (name.clone(), resolver.resolve(name, range).unwrap()))
            .collect()
    }
}

fn expect_resolved(outcome: &Option<ResolutionOutcome>) -> &modsync::resolver::ResolvedMod {
    match outcome {
        Some(ResolutionOutcome::Resolved(resolved)) => resolved,
        other => panic!("expected a resolution, got {other:?}"),
    }
}

#[test]
fn test_registry_payload_resolves_highest_compatible_version() {
    let harness = Harness::new();
    let requirements = BTreeMap::from([("SongCore".to_string(), "^3.0.0".to_string())]);

    let outcomes = harness.resolve_all(&requirements);
    let resolved = expect_resolved(&outcomes[0].1);
    assert_eq!(resolved.version, Version::new(3, 4, 1));
    assert_eq!(resolved.url, "https://registry.test/uploads/songcore-3.4.1.zip");
    assert_eq!(resolved.origin, Origin::Registry);
}

#[test]
fn test_tilde_range_selects_within_minor() {
    let harness = Harness::new();
    let requirements = BTreeMap::from([("SongCore".to_string(), "~3.4.0".to_string())]);

    let outcomes = harness.resolve_all(&requirements);
    let resolved = expect_resolved(&outcomes[0].1);
    assert_eq!(resolved.version, Version::new(3, 4, 1));
}

#[test]
fn test_merged_requirements_resolve_in_name_order() {
    let harness = Harness::new();

    let aux = vec![BTreeMap::from([("SongCore".to_string(), "^2.0.0".to_string())])];
    let primary = BTreeMap::from([
        ("SongCore".to_string(), "^3.0.0".to_string()),
        (CORE_RUNTIME_PACKAGE.to_string(), "^4.0.0".to_string()),
    ]);
    let manual = BTreeMap::from([("OculusOnly".to_string(), "^1.0.0".to_string())]);
    let requirements = merge_requirements(&aux, &primary, &manual);

    // Primary overrides the auxiliary range; names iterate sorted
    assert_eq!(requirements["SongCore"], "^3.0.0");
    let names: Vec<_> = requirements.keys().cloned().collect();
    assert_eq!(names, vec!["BSIPA", "OculusOnly", "SongCore"]);

    let outcomes = harness.resolve_all(&requirements);

    // The core runtime package is silently skipped
    assert_eq!(outcomes[0].0, CORE_RUNTIME_PACKAGE);
    assert!(outcomes[0].1.is_none());

    assert!(matches!(
        outcomes[1].1,
        Some(ResolutionOutcome::NoUniversalDownload)
    ));

    let resolved = expect_resolved(&outcomes[2].1);
    assert_eq!(resolved.version, Version::new(3, 4, 1));
}

#[test]
fn test_fallback_source_resolution_end_to_end() {
    let mut harness = Harness::new();
    harness.seed_source(
        "Foo",
        "org/foo",
        &[
            ("Foo-1.1.0-gv1.34.2.zip", "https://releases.test/foo-1.1.0.zip"),
            ("Foo-1.2.0-gv1.34.2.zip", "https://releases.test/foo-1.2.0.zip"),
            ("Foo-1.3.0-gv9.9.9.zip", "https://releases.test/foo-unknown.zip"),
            ("README.md", "https://releases.test/readme"),
        ],
    );

    let requirements = BTreeMap::from([("Foo".to_string(), "^1.0.0".to_string())]);
    let outcomes = harness.resolve_all(&requirements);

    // Highest in-range version with a known, compatible game version wins;
    // the unknown-token asset and the malformed name never match
    let resolved = expect_resolved(&outcomes[0].1);
    assert_eq!(resolved.version, Version::new(1, 2, 0));
    assert_eq!(resolved.url, "https://releases.test/foo-1.2.0.zip");
    assert_eq!(resolved.origin, Origin::Source("org/foo".to_string()));
}

#[test]
fn test_fallback_accepts_older_game_version_assets() {
    let mut harness = Harness::new();
    harness.seed_source(
        "Foo",
        "org/foo",
        &[("Foo-1.1.0-gv1.34.0.zip", "https://releases.test/foo-old-gv.zip")],
    );

    let requirements = BTreeMap::from([("Foo".to_string(), "^1.0.0".to_string())]);
    let outcomes = harness.resolve_all(&requirements);

    let resolved = expect_resolved(&outcomes[0].1);
    assert_eq!(resolved.url, "https://releases.test/foo-old-gv.zip");
}

#[test]
fn test_alias_resolves_against_registry_name() {
    let mut harness = Harness::new();
    harness
        .aliases
        .insert("SongCoreLegacy".to_string(), "SongCore".to_string());

    let requirements = BTreeMap::from([("SongCoreLegacy".to_string(), "^3.0.0".to_string())]);
    let outcomes = harness.resolve_all(&requirements);

    let resolved = expect_resolved(&outcomes[0].1);
    assert_eq!(resolved.name, "SongCoreLegacy");
    assert_eq!(resolved.version, Version::new(3, 4, 1));
}

#[test]
fn test_plugin_ids_are_excluded() {
    let mut harness = Harness::new();
    harness.exclusions.add("SongCore");

    let requirements = BTreeMap::from([("SongCore".to_string(), "^3.0.0".to_string())]);
    let outcomes = harness.resolve_all(&requirements);
    assert!(outcomes[0].1.is_none());
}

#[test]
fn test_unsatisfiable_requirement_is_a_warning_not_an_error() {
    let harness = Harness::new();
    let requirements = BTreeMap::from([("SongCore".to_string(), "^9.0.0".to_string())]);

    let outcomes = harness.resolve_all(&requirements);
    assert!(matches!(outcomes[0].1, Some(ResolutionOutcome::NoMatch)));
}

#[test]
fn test_catalog_alias_and_fallback_interplay() {
    // A requested catalog alias resolves to its canonical entry before the
    // registry query; the canonical entry is what fallback matching sees.
    let catalog = test_catalog();
    assert_eq!(catalog.resolve("Latest"), "1.34.2");
    assert_eq!(catalog.resolve("1.34.0"), "1.34.0");
    assert_eq!(catalog.resolve("9.9.9"), "1.34.2");
}
