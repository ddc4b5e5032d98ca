//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! queries and commands git-release needs, so release logic can run against
//! a real repository or an in-memory double.
//!
//! - [repository::GitRepository]: libgit2 for read-side queries, the `git`
//!   binary for history walks, name resolution, tagging and pushing
//! - [mock::MockVcs]: scripted responses for tests
//!
//! Raw command output is turned into structured values by [parse].

pub mod mock;
pub mod parse;
pub mod repository;

pub use mock::MockVcs;
pub use repository::GitRepository;

use std::path::Path;

use crate::domain::RepositoryMode;
use crate::error::Result;

/// One commit as returned by the changelog log query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitRecord {
    /// Full message body
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub email: String,
}

/// Version-control capabilities used by the release tasks.
///
/// Every call runs to completion before returning; nothing is cached between
/// calls. Implementations map underlying failures to
/// [crate::error::GitReleaseError].
pub trait VcsClient {
    /// Root of the working tree.
    fn workdir(&self) -> &Path;

    /// Whether this is a plain repository or a git-svn mirror.
    fn mode(&self) -> RepositoryMode;

    /// Reads a configuration value; `Ok(None)` when the key is unset.
    fn config_value(&self, key: &str) -> Result<Option<String>>;

    /// True when there are no staged, unstaged or untracked changes.
    fn is_clean(&self) -> Result<bool>;

    /// Paths of all files tracked in the index, relative to the working tree.
    fn tracked_files(&self) -> Result<Vec<String>>;

    /// Names of remote-tracking branches, e.g. `origin/tags/v1.0`.
    fn remote_branches(&self) -> Result<Vec<String>>;

    /// Hashes of decorated commits, oldest first.
    fn decorated_history(&self) -> Result<Vec<String>>;

    /// Resolves each hash to its symbolic name relative to tags, in input order.
    ///
    /// Unnamed commits come back as `undefined`.
    fn name_commits(&self, hashes: &[String]) -> Result<Vec<String>>;

    /// Commits in `<from>..HEAD`, or all of `HEAD` when `from` is `None`, newest first.
    fn log_range(&self, from: Option<&str>) -> Result<Vec<CommitRecord>>;

    /// Creates (or replaces) a tag at `HEAD`.
    fn create_tag(&self, name: &str, message: Option<&str>, signed: bool) -> Result<()>;

    /// Force-pushes a tag to `remote`.
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;

    /// Creates a tag in the Subversion repository behind a git-svn mirror.
    fn mirror_tag(&self, name: &str, message: Option<&str>) -> Result<()>;
}
