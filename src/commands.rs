// src/commands.rs
//! Command handlers for the modsync CLI

use anyhow::Result;
use modsync::catalog::VersionCatalog;
use modsync::config::InstallOptions;
use modsync::env_file;
use modsync::fallback::{SourceClient, SourcePools};
use modsync::http::HttpClient;
use modsync::installer::Installer;
use modsync::project;
use modsync::registry::RegistryClient;
use modsync::resolver::{merge_requirements, ExclusionSet, Origin, ResolutionOutcome, Resolver};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the CI environment-export file
pub const ENV_FILE_VAR: &str = "GITHUB_ENV";

/// Resolve a project's mod requirements and install each match in turn
#[allow(clippy::too_many_arguments)]
pub fn run_install(
    project_path: String,
    project_configuration: String,
    game_version: Option<String>,
    path: PathBuf,
    aliases: String,
    additional_dependencies: String,
    additional_sources: String,
    additional_project_paths: String,
    dry_run: bool,
) -> Result<()> {
    let options = InstallOptions::from_raw(
        project_path,
        project_configuration,
        game_version,
        path,
        &aliases,
        &additional_dependencies,
        &additional_sources,
        &additional_project_paths,
    )?;

    let http = HttpClient::new()?;

    let primary = project::query_project(&options.project_path, &options.project_configuration)?;

    let catalog = VersionCatalog::fetch(&http)?;
    let game_version = match options
        .game_version
        .as_deref()
        .or(primary.game_version.as_deref())
    {
        Some(requested) => catalog.resolve(requested).to_string(),
        None => {
            let latest = catalog.latest();
            warn!("No game version requested; using latest version '{latest}'");
            latest.to_string()
        }
    };

    let registry = RegistryClient::new(&http);
    let pool = registry.fetch_candidates(&game_version)?;

    let mut exclusions = ExclusionSet::new();
    if let Some(plugin_id) = &primary.plugin_id {
        exclusions.add(plugin_id.clone());
    }

    let auxiliary = project::query_projects(
        &options.additional_project_paths,
        &options.project_configuration,
    )?;
    let mut auxiliary_deps = Vec::new();
    for info in auxiliary {
        if let Some(plugin_id) = info.plugin_id {
            exclusions.add(plugin_id);
        }
        auxiliary_deps.push(info.dependencies);
    }

    let requirements = merge_requirements(
        &auxiliary_deps,
        &primary.dependencies,
        &options.additional_dependencies,
    );
    info!(
        "Resolving {} mod requirements against game version '{game_version}'",
        requirements.len()
    );

    let pools = SourcePools::new(SourceClient::new(&http));
    let mut resolver = Resolver::new(
        &registry,
        &pool,
        &catalog,
        &game_version,
        &options.aliases,
        &options.additional_sources,
        &exclusions,
        pools,
    );
    let installer = Installer::new(&http, &options.install_dir);

    let mut installed = 0usize;
    for (name, range) in &requirements {
        match resolver.resolve(name, range)? {
            None => {}
            Some(ResolutionOutcome::Resolved(resolved)) => {
                match &resolved.origin {
                    Origin::Registry => {
                        info!("Installing '{name}' {} from the registry", resolved.version)
                    }
                    Origin::Source(source) => {
                        info!("Installing '{name}' {} from '{source}'", resolved.version)
                    }
                }
                if dry_run {
                    info!("Dry run; not downloading '{}'", resolved.url);
                } else {
                    installer.install_from(&resolved.url)?;
                }
                installed += 1;
            }
            Some(ResolutionOutcome::NoMatch) => {
                warn!("No mod matching '{name}' {range} was found")
            }
            Some(ResolutionOutcome::NoUniversalDownload) => {
                warn!("Mod '{name}' has no universal download; skipping")
            }
        }
    }
    info!("Resolved {installed} of {} requirements", requirements.len());

    if dry_run {
        return Ok(());
    }

    match env::var(ENV_FILE_VAR) {
        Ok(env_path) => env_file::append_install_dir(Path::new(&env_path), &options.install_dir)?,
        Err(_) => warn!("{ENV_FILE_VAR} is not set; skipping environment export"),
    }

    Ok(())
}
