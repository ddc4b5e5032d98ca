use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::{Config, Overrides};
use crate::domain::release_tag_name;
use crate::error::{GitReleaseError, Result};

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<PackageSection>,
    workspace: Option<WorkspaceSection>,
}

#[derive(Debug, Deserialize)]
struct WorkspaceSection {
    package: Option<PackageSection>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    version: Option<toml::Value>,
}

/// Reads the project version from `Cargo.toml` in `workdir`.
///
/// Looks at `package.version` first, then `workspace.package.version`. The
/// value must be a valid semantic version.
///
/// # Returns
/// * `Ok(Some(version))` - Version string as written in the manifest
/// * `Ok(None)` - No manifest, or no literal version in it
/// * `Err` - Manifest unreadable or version not semver
pub fn read_cargo_version(workdir: &Path) -> Result<Option<String>> {
    let path = workdir.join("Cargo.toml");
    if !path.exists() {
        return Ok(None);
    }

    let manifest: CargoManifest = toml::from_str(&fs::read_to_string(&path)?)?;

    let version = [
        manifest.package,
        manifest.workspace.and_then(|workspace| workspace.package),
    ]
    .into_iter()
    .flatten()
    .filter_map(|package| package.version)
    // `version.workspace = true` is a table; keep looking.
    .find_map(|value| value.as_str().map(str::to_string));

    match version {
        Some(version) => {
            semver::Version::parse(&version).map_err(|e| {
                GitReleaseError::version(format!(
                    "{} has invalid version '{}': {}",
                    path.display(),
                    version,
                    e
                ))
            })?;
            Ok(Some(version))
        }
        None => Ok(None),
    }
}

/// Determines the version being released.
///
/// Order: the `VERSION` override, the configured version, then `Cargo.toml`.
pub fn resolve_version(overrides: &Overrides, config: &Config, workdir: &Path) -> Result<String> {
    if let Some(version) = overrides.version.as_ref().or(config.version.as_ref()) {
        return Ok(version.clone());
    }

    read_cargo_version(workdir)?.ok_or_else(|| {
        GitReleaseError::version(
            "No version to release: set VERSION, `version` in the config, or a Cargo.toml package version",
        )
    })
}

/// Computes the tag to create: the `TAG` override, else prefix + version + prerelease.
pub fn resolve_tag_name(overrides: &Overrides, config: &Config, workdir: &Path) -> Result<String> {
    if let Some(tag) = &overrides.tag {
        return Ok(tag.clone());
    }

    let version = resolve_version(overrides, config, workdir)?;
    Ok(release_tag_name(
        &config.tag_prefix,
        &version,
        overrides.prerelease.as_deref(),
    ))
}
