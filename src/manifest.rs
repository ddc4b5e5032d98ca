//! Manifest synchronization with the git index.

use std::fs;
use std::path::PathBuf;

use regex::Regex;
use tracing::debug;

use crate::config::ManifestConfig;
use crate::error::Result;
use crate::git::VcsClient;

/// Sorted tracked files that do not match `exclude`.
///
/// An absent or empty pattern keeps every file.
pub fn manifest_entries(files: Vec<String>, exclude: Option<&str>) -> Result<Vec<String>> {
    let exclude = match exclude.filter(|pattern| !pattern.is_empty()) {
        Some(pattern) => Some(Regex::new(pattern)?),
        None => None,
    };

    let mut entries: Vec<String> = files
        .into_iter()
        .filter(|file| exclude.as_ref().map_or(true, |re| !re.is_match(file)))
        .collect();
    entries.sort();
    Ok(entries)
}

/// Rewrites the manifest file from the index and returns its path and entry count.
pub fn sync_manifest<V: VcsClient + ?Sized>(
    vcs: &V,
    config: &ManifestConfig,
) -> Result<(PathBuf, usize)> {
    let entries = manifest_entries(vcs.tracked_files()?, config.exclude.as_deref())?;

    let path = vcs.workdir().join(&config.path);
    let mut content = entries.join("\n");
    content.push('\n');
    fs::write(&path, content)?;

    debug!(path = %path.display(), entries = entries.len(), "wrote manifest");
    Ok((path, entries.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockVcs;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_entries_are_sorted() {
        let entries = manifest_entries(files(&["src/b.rs", "README.md", "src/a.rs"]), None).unwrap();
        assert_eq!(entries, vec!["README.md", "src/a.rs", "src/b.rs"]);
    }

    #[test]
    fn test_default_exclude_drops_vcs_files() {
        let exclude = ManifestConfig::default().exclude;
        let entries = manifest_entries(
            files(&[".gitignore", "lib/tool.rb", "notes.tmp", "TAGS"]),
            exclude.as_deref(),
        )
        .unwrap();
        assert_eq!(entries, vec!["lib/tool.rb"]);
    }

    #[test]
    fn test_empty_pattern_keeps_everything() {
        let entries = manifest_entries(files(&["a", ".gitignore"]), Some("")).unwrap();
        assert_eq!(entries, vec![".gitignore", "a"]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(manifest_entries(files(&["a"]), Some("(")).is_err());
    }

    #[test]
    fn test_sync_overwrites_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Manifest.txt"), "stale\n").unwrap();

        let vcs = MockVcs::new()
            .with_workdir(dir.path())
            .with_tracked_file("lib/z.rs")
            .with_tracked_file("Cargo.toml");

        let (path, count) = sync_manifest(&vcs, &ManifestConfig::default()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "Cargo.toml\nlib/z.rs\n"
        );
    }
}
