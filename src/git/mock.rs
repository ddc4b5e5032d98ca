use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::RepositoryMode;
use crate::error::{GitReleaseError, Result};
use crate::git::{CommitRecord, VcsClient};

/// A write-side call recorded by [MockVcs]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateTag {
        name: String,
        message: Option<String>,
        signed: bool,
    },
    PushTag {
        remote: String,
        name: String,
    },
    MirrorTag {
        name: String,
        message: Option<String>,
    },
}

/// Mock repository for testing without actual git operations
pub struct MockVcs {
    workdir: PathBuf,
    mode: RepositoryMode,
    config: HashMap<String, String>,
    clean: bool,
    tracked_files: Vec<String>,
    remote_branches: Vec<String>,
    history: Vec<String>,
    names: HashMap<String, String>,
    commits: Vec<CommitRecord>,
    ranges: Mutex<Vec<Option<String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockVcs {
    /// Create a new empty, clean, native mock repository
    pub fn new() -> Self {
        MockVcs {
            workdir: PathBuf::from("."),
            mode: RepositoryMode::Native,
            config: HashMap::new(),
            clean: true,
            tracked_files: Vec::new(),
            remote_branches: Vec::new(),
            history: Vec::new(),
            names: HashMap::new(),
            commits: Vec::new(),
            ranges: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_mode(mut self, mode: RepositoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn with_dirty_tree(mut self) -> Self {
        self.clean = false;
        self
    }

    pub fn with_tracked_file(mut self, path: impl Into<String>) -> Self {
        self.tracked_files.push(path.into());
        self
    }

    pub fn with_remote_branch(mut self, name: impl Into<String>) -> Self {
        self.remote_branches.push(name.into());
        self
    }

    /// Append a decorated commit (oldest first) and the name `name-rev` gives it
    pub fn with_decorated_commit(mut self, hash: impl Into<String>, name: impl Into<String>) -> Self {
        let hash = hash.into();
        self.names.insert(hash.clone(), name.into());
        self.history.push(hash);
        self
    }

    /// Append a commit to the log, newest first like `git log`
    pub fn with_commit(mut self, message: impl Into<String>) -> Self {
        self.commits.push(CommitRecord {
            message: message.into(),
            author: "Test Author".to_string(),
            email: "test@example.com".to_string(),
        });
        self
    }

    /// Lower bounds passed to `log_range`, in call order
    pub fn requested_ranges(&self) -> Vec<Option<String>> {
        self.ranges.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Write-side calls, in call order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        self.calls
            .lock()
            .map_err(|_| GitReleaseError::tag("mock call log poisoned"))?
            .push(call);
        Ok(())
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsClient for MockVcs {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn mode(&self) -> RepositoryMode {
        self.mode
    }

    fn config_value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.config.get(key).cloned())
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn tracked_files(&self) -> Result<Vec<String>> {
        Ok(self.tracked_files.clone())
    }

    fn remote_branches(&self) -> Result<Vec<String>> {
        Ok(self.remote_branches.clone())
    }

    fn decorated_history(&self) -> Result<Vec<String>> {
        Ok(self.history.clone())
    }

    fn name_commits(&self, hashes: &[String]) -> Result<Vec<String>> {
        Ok(hashes
            .iter()
            .map(|hash| {
                self.names
                    .get(hash)
                    .cloned()
                    .unwrap_or_else(|| "undefined".to_string())
            })
            .collect())
    }

    fn log_range(&self, from: Option<&str>) -> Result<Vec<CommitRecord>> {
        if let Ok(mut ranges) = self.ranges.lock() {
            ranges.push(from.map(str::to_string));
        }
        Ok(self.commits.clone())
    }

    fn create_tag(&self, name: &str, message: Option<&str>, signed: bool) -> Result<()> {
        self.record(RecordedCall::CreateTag {
            name: name.to_string(),
            message: message.map(str::to_string),
            signed,
        })
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        self.record(RecordedCall::PushTag {
            remote: remote.to_string(),
            name: name.to_string(),
        })
    }

    fn mirror_tag(&self, name: &str, message: Option<&str>) -> Result<()> {
        self.record(RecordedCall::MirrorTag {
            name: name.to_string(),
            message: message.map(str::to_string),
        })
    }
}
