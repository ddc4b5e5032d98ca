use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{BranchType, ErrorCode, Repository as Git2Repo, StatusOptions};
use tracing::debug;

use crate::domain::RepositoryMode;
use crate::error::{GitReleaseError, Result};
use crate::git::parse::{self, LOG_FORMAT};
use crate::git::{CommitRecord, VcsClient};

/// Wrapper around git2::Repository with our trait interface
pub struct GitRepository {
    repo: Git2Repo,
    workdir: PathBuf,
    mode: RepositoryMode,
}

impl GitRepository {
    /// Open or discover a git repository with a working tree
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let workdir = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GitReleaseError::config("Bare repositories are not supported"))?;

        let mode = if repo.path().join("svn").exists() {
            RepositoryMode::SvnMirror
        } else {
            RepositoryMode::Native
        };
        debug!(workdir = %workdir.display(), ?mode, "opened repository");

        Ok(GitRepository {
            repo,
            workdir,
            mode,
        })
    }

    /// Runs `git` in the working tree and returns its stdout.
    fn git(&self, args: &[&str]) -> Result<String> {
        debug!(?args, "running git");

        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitReleaseError::command(args, stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn has_commits(&self) -> Result<bool> {
        Ok(!self.repo.is_empty()?)
    }
}

impl VcsClient for GitRepository {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn mode(&self) -> RepositoryMode {
        self.mode
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        let config = self.repo.config()?.snapshot()?;

        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        debug!(changes = statuses.len(), "checked working tree status");
        Ok(statuses.is_empty())
    }

    fn tracked_files(&self) -> Result<Vec<String>> {
        let index = self.repo.index()?;

        let mut files: Vec<String> = index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .collect();
        // Conflicted paths appear once per stage.
        files.dedup();
        Ok(files)
    }

    fn remote_branches(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for branch in self.repo.branches(Some(BranchType::Remote))? {
            let (branch, _) = branch?;
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    fn decorated_history(&self) -> Result<Vec<String>> {
        if !self.has_commits()? {
            return Ok(Vec::new());
        }

        let output = self.git(&[
            "log",
            "--date-order",
            "--simplify-by-decoration",
            "--pretty=format:%H",
        ])?;

        let mut hashes = parse::parse_hash_list(&output);
        hashes.reverse();
        Ok(hashes)
    }

    fn name_commits(&self, hashes: &[String]) -> Result<Vec<String>> {
        if hashes.is_empty() {
            return Ok(Vec::new());
        }

        let mut args = vec!["name-rev", "--tags"];
        args.extend(hashes.iter().map(String::as_str));

        let output = self.git(&args)?;
        Ok(parse::parse_name_rev(&output))
    }

    fn log_range(&self, from: Option<&str>) -> Result<Vec<CommitRecord>> {
        if !self.has_commits()? {
            return Ok(Vec::new());
        }

        let range = match from {
            Some(from) => format!("{}..HEAD", from),
            None => "HEAD".to_string(),
        };

        let output = self.git(&["log", &range, LOG_FORMAT])?;
        Ok(parse::parse_log_records(&output))
    }

    fn create_tag(&self, name: &str, message: Option<&str>, signed: bool) -> Result<()> {
        let mut args = vec!["tag"];
        if signed {
            args.push("-s");
        }
        args.extend(["-f", name]);
        if let Some(message) = message {
            args.extend(["-m", message]);
        }

        self.git(&args)?;
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        self.git(&["push", "-f", remote, "tag", name])?;
        Ok(())
    }

    fn mirror_tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        let mut args = vec!["svn", "tag", name];
        if let Some(message) = message {
            args.extend(["-m", message]);
        }

        self.git(&args)?;
        Ok(())
    }
}
