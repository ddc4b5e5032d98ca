use crate::error::{GitReleaseError, Result};

/// How the repository relates to its canonical history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryMode {
    /// Plain git repository; tags live in `refs/tags`.
    Native,
    /// git-svn mirror; tags are remote-tracking branches under the svn tag path.
    SvnMirror,
}

/// Builds a release tag name from the prefix, version and optional prerelease.
///
/// `("v", "1.2.0", Some("beta1"))` -> `"v1.2.0.beta1"`
pub fn release_tag_name(prefix: &str, version: &str, prerelease: Option<&str>) -> String {
    match prerelease {
        Some(pre) => format!("{}{}.{}", prefix, version, pre),
        None => format!("{}{}", prefix, version),
    }
}

/// Extracts the remote branch segment from a git-svn tag source.
///
/// The value of `svn-remote.svn.tags` must end in `/*`. What precedes it is
/// reduced to the part that prefixes remote-tracking branch names:
///
/// - `tags/*:refs/remotes/origin/tags/*` -> `origin/tags`
/// - `https://host/repo/tags/*` -> `repo/tags`
pub fn tag_source_segment(source: &str) -> Result<String> {
    let source = source.trim();
    let scheme_error = || GitReleaseError::TagScheme(source.to_string());

    let stem = source.strip_suffix("/*").ok_or_else(scheme_error)?;

    let segment = if let Some(idx) = stem.find("refs/remotes/") {
        &stem[idx + "refs/remotes/".len()..]
    } else if let Some(idx) = stem.find("://") {
        let after_scheme = &stem[idx + "://".len()..];
        after_scheme
            .find('/')
            .map(|slash| &after_scheme[slash + 1..])
            .unwrap_or("")
    } else {
        stem
    };

    if segment.is_empty() {
        return Err(scheme_error());
    }
    Ok(segment.to_string())
}

/// Keeps remote branches that sit under `<segment>/<prefix>`, in listing order.
pub fn select_mirrored_tags<I, S>(branches: I, segment: &str, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let wanted = format!("{}/{}", segment, prefix);
    branches
        .into_iter()
        .map(|branch| branch.as_ref().trim().to_string())
        .filter(|branch| branch.starts_with(&wanted))
        .collect()
}

/// Reduces one symbolic name from `git name-rev --tags` to a tag name.
///
/// Returns `None` for unnamed commits (`undefined`) and for names relative
/// to a tag (`tags/v1.0~2`). A trailing `^0` peel marker is dropped.
pub fn tag_from_symbolic_name(name: &str) -> Option<&str> {
    let idx = name.find("tags/")?;
    let tag = &name[idx + "tags/".len()..];
    let tag = tag.strip_suffix("^0").unwrap_or(tag);

    if tag.is_empty() || tag.contains('~') || tag.contains('^') {
        return None;
    }
    Some(tag)
}

/// Turns resolved symbolic names into release tags, keeping those that start with `prefix`.
pub fn select_native_tags<I, S>(names: I, prefix: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| tag_from_symbolic_name(name.as_ref()).map(str::to_string))
        .filter(|tag| tag.starts_with(prefix))
        .collect()
}
