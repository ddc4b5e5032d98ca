//! Release operations composed from [VcsClient] calls.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::tag::{select_mirrored_tags, select_native_tags};
use crate::domain::{tag_source_segment, Changelog, RepositoryMode};
use crate::error::{GitReleaseError, Result};
use crate::git::parse::message_lines;
use crate::git::VcsClient;

/// Config key holding the git-svn tag source.
pub const SVN_TAGS_KEY: &str = "svn-remote.svn.tags";

/// Config key whose presence turns on signed tags.
pub const SIGNING_KEY: &str = "user.signingkey";

/// Lists release tags known to the repository, oldest first.
///
/// Native repositories resolve decorated commits to tag names; git-svn
/// mirrors filter remote-tracking branches under the svn tag path.
pub fn discover_tags<V: VcsClient + ?Sized>(vcs: &V, prefix: &str) -> Result<Vec<String>> {
    let tags = match vcs.mode() {
        RepositoryMode::SvnMirror => {
            let source = vcs.config_value(SVN_TAGS_KEY)?.unwrap_or_default();
            let segment = tag_source_segment(&source)?;
            debug!(%segment, "discovering git-svn tags");
            select_mirrored_tags(vcs.remote_branches()?, &segment, prefix)
        }
        RepositoryMode::Native => {
            let hashes = vcs.decorated_history()?;
            let names = vcs.name_commits(&hashes)?;
            debug!(commits = hashes.len(), "resolved decorated commits");
            select_native_tags(names, prefix)
        }
    };

    debug!(count = tags.len(), "discovered release tags");
    Ok(tags)
}

/// Commit message lines since `from`, or since the latest release tag.
pub fn changelog_lines<V: VcsClient + ?Sized>(
    vcs: &V,
    from: Option<&str>,
    prefix: &str,
) -> Result<Vec<String>> {
    let from = match from {
        Some(from) => Some(from.to_string()),
        None => discover_tags(vcs, prefix)?.pop(),
    };
    debug!(from = ?from, "collecting changelog lines");

    let records = vcs.log_range(from.as_deref())?;
    let lines = records
        .iter()
        .flat_map(|record| message_lines(&record.message))
        .map(str::to_string)
        .collect();

    Ok(lines)
}

/// Builds the changelog report; `None` when the range has no commit lines.
pub fn build_changelog<V: VcsClient + ?Sized>(
    vcs: &V,
    config: &Config,
    from: Option<&str>,
    label: Option<&str>,
    today: NaiveDate,
) -> Result<Option<String>> {
    let lines = changelog_lines(vcs, from, &config.tag_prefix)?;
    if lines.is_empty() {
        debug!("no commits in range, skipping changelog");
        return Ok(None);
    }

    Ok(Changelog::from_lines(lines).render(label, today))
}

/// Refuses to continue unless the working tree is clean.
pub fn release_sanity<V: VcsClient + ?Sized>(vcs: &V) -> Result<()> {
    if vcs.is_clean()? {
        Ok(())
    } else {
        Err(GitReleaseError::DirtyWorkingTree)
    }
}

/// What [tag_and_push] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub tag: String,
    pub signed: bool,
    /// Remotes the tag was pushed to; empty for git-svn mirrors.
    pub pushed_to: Vec<String>,
}

/// Creates `tag` and publishes it.
///
/// git-svn mirrors get a single `git svn tag`. Otherwise the tag is created
/// locally, signed when `user.signingkey` is set, and force-pushed to every
/// configured remote in order.
pub fn tag_and_push<V: VcsClient + ?Sized>(
    vcs: &V,
    config: &Config,
    tag: &str,
    message: Option<&str>,
) -> Result<TagOutcome> {
    if vcs.mode() == RepositoryMode::SvnMirror {
        info!(%tag, "creating svn tag");
        vcs.mirror_tag(tag, message)?;
        return Ok(TagOutcome {
            tag: tag.to_string(),
            signed: false,
            pushed_to: Vec::new(),
        });
    }

    let signed = vcs
        .config_value(SIGNING_KEY)?
        .is_some_and(|key| !key.trim().is_empty());

    info!(%tag, signed, "creating tag");
    vcs.create_tag(tag, message, signed)?;

    let mut pushed_to = Vec::new();
    for remote in &config.remotes {
        info!(%tag, %remote, "pushing tag");
        vcs.push_tag(remote, tag)?;
        pushed_to.push(remote.clone());
    }

    Ok(TagOutcome {
        tag: tag.to_string(),
        signed,
        pushed_to,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::{MockVcs, RecordedCall};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn test_native_discovery_oldest_first() {
        let vcs = MockVcs::new()
            .with_decorated_commit("a1", "tags/v0.9^0")
            .with_decorated_commit("b2", "undefined")
            .with_decorated_commit("c3", "tags/beta-v1.0")
            .with_decorated_commit("d4", "tags/v1.0");

        assert_eq!(discover_tags(&vcs, "v").unwrap(), vec!["v0.9", "v1.0"]);
    }

    #[test]
    fn test_svn_discovery_uses_tag_source() {
        let vcs = MockVcs::new()
            .with_mode(RepositoryMode::SvnMirror)
            .with_config(SVN_TAGS_KEY, "tags/*:refs/remotes/svn/tags/*")
            .with_remote_branch("svn/trunk")
            .with_remote_branch("svn/tags/v1.0")
            .with_remote_branch("svn/tags/old-1");

        assert_eq!(discover_tags(&vcs, "v").unwrap(), vec!["svn/tags/v1.0"]);
    }

    #[test]
    fn test_svn_discovery_without_tag_source_fails() {
        let vcs = MockVcs::new().with_mode(RepositoryMode::SvnMirror);
        let err = discover_tags(&vcs, "v").unwrap_err();
        assert!(matches!(err, GitReleaseError::TagScheme(_)));
    }

    #[test]
    fn test_changelog_starts_at_latest_tag() {
        let vcs = MockVcs::new()
            .with_decorated_commit("a1", "tags/v1.0")
            .with_decorated_commit("b2", "tags/v1.1")
            .with_commit("- fixed it\n");

        let lines = changelog_lines(&vcs, None, "v").unwrap();
        assert_eq!(lines, vec!["- fixed it"]);
        assert_eq!(vcs.requested_ranges(), vec![Some("v1.1".to_string())]);
    }

    #[test]
    fn test_changelog_from_override_skips_discovery() {
        let vcs = MockVcs::new()
            .with_decorated_commit("a1", "tags/v1.0")
            .with_commit("+ thing");

        changelog_lines(&vcs, Some("abc123"), "v").unwrap();
        assert_eq!(vcs.requested_ranges(), vec![Some("abc123".to_string())]);
    }

    #[test]
    fn test_changelog_without_tags_covers_full_history() {
        let vcs = MockVcs::new().with_commit("first");
        changelog_lines(&vcs, None, "v").unwrap();
        assert_eq!(vcs.requested_ranges(), vec![None]);
    }

    #[test]
    fn test_empty_range_builds_no_report() {
        let vcs = MockVcs::new().with_commit("\n\n");
        let report = build_changelog(&vcs, &Config::default(), None, None, today()).unwrap();
        assert_eq!(report, None);
    }

    #[test]
    fn test_release_sanity() {
        assert!(release_sanity(&MockVcs::new()).is_ok());
        let err = release_sanity(&MockVcs::new().with_dirty_tree()).unwrap_err();
        assert!(matches!(err, GitReleaseError::DirtyWorkingTree));
    }

    #[test]
    fn test_tag_and_push_to_every_remote() {
        let vcs = MockVcs::new();
        let config = Config {
            remotes: vec!["origin".to_string(), "mirror".to_string()],
            ..Config::default()
        };

        let outcome = tag_and_push(&vcs, &config, "v1.0", Some("first")).unwrap();

        assert_eq!(outcome.pushed_to, vec!["origin", "mirror"]);
        assert!(!outcome.signed);
        assert_eq!(
            vcs.calls(),
            vec![
                RecordedCall::CreateTag {
                    name: "v1.0".to_string(),
                    message: Some("first".to_string()),
                    signed: false,
                },
                RecordedCall::PushTag {
                    remote: "origin".to_string(),
                    name: "v1.0".to_string(),
                },
                RecordedCall::PushTag {
                    remote: "mirror".to_string(),
                    name: "v1.0".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_signing_key_signs_tag() {
        let vcs = MockVcs::new().with_config(SIGNING_KEY, "ABCDEF12");
        let outcome = tag_and_push(&vcs, &Config::default(), "v2.0", None).unwrap();

        assert!(outcome.signed);
        assert!(matches!(
            vcs.calls().first(),
            Some(RecordedCall::CreateTag { signed: true, .. })
        ));
    }

    #[test]
    fn test_blank_signing_key_does_not_sign() {
        let vcs = MockVcs::new().with_config(SIGNING_KEY, "  ");
        let outcome = tag_and_push(&vcs, &Config::default(), "v2.0", None).unwrap();
        assert!(!outcome.signed);
    }

    #[test]
    fn test_svn_mirror_tags_without_pushing() {
        let vcs = MockVcs::new().with_mode(RepositoryMode::SvnMirror);
        let outcome = tag_and_push(&vcs, &Config::default(), "v3.0", Some("msg")).unwrap();

        assert!(outcome.pushed_to.is_empty());
        assert_eq!(
            vcs.calls(),
            vec![RecordedCall::MirrorTag {
                name: "v3.0".to_string(),
                message: Some("msg".to_string()),
            }]
        );
    }
}
