use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum GitReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Can't discover git-svn tag scheme from {0}")]
    TagScheme(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Won't release: Dirty index or untracked files present!")]
    DirtyWorkingTree,

    #[error("Invalid exclude pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, GitReleaseError>;

impl GitReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitReleaseError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        GitReleaseError::Tag(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        GitReleaseError::Version(msg.into())
    }

    /// Create a failed-command error from the argument list and captured stderr
    pub fn command(args: &[&str], stderr: impl Into<String>) -> Self {
        GitReleaseError::Command {
            command: format!("git {}", args.join(" ")),
            stderr: stderr.into(),
        }
    }
}
