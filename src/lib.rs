pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod git_ops;
pub mod manifest;
pub mod ui;
pub mod version;

pub use error::{GitReleaseError, Result};
