//! Task dispatch
//!
//! Each task maps to one command of the binary. Dispatch is kept free of
//! `clap` and of the terminal so it can be driven programmatically: report
//! output goes to the supplied writer and the tag message prompt is a
//! callback.

use std::io::Write;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{Config, Overrides};
use crate::error::Result;
use crate::git::VcsClient;
use crate::git_ops::{self, TagOutcome};
use crate::manifest;
use crate::ui::non_empty_message;
use crate::version::resolve_tag_name;

/// A unit of work requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Print the changelog since the last release tag.
    Changelog,
    /// Rewrite the manifest from the git index.
    Manifest,
    /// Create and push a release tag.
    Tag,
    /// Print the discovered release tags.
    Tags,
    /// Fail unless the working tree is clean.
    ReleaseSanity,
    /// Sanity check, then tag.
    Release,
}

/// Inputs shared by all tasks for one run
#[derive(Debug, Clone, PartialEq)]
pub struct TaskArgs {
    pub overrides: Overrides,
    /// Date printed in the changelog header.
    pub today: NaiveDate,
}

/// What a task produced
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The changelog was printed (`true`) or the range was empty (`false`).
    Changelog { printed: bool },
    Manifest { path: String, entries: usize },
    Tagged(TagOutcome),
    Tags(Vec<String>),
    Clean,
}

/// Runs `task` against `vcs`.
///
/// `prompt` is only called when a tag is about to be created, no message
/// override is set, and `config.ask_tag_message` is on.
pub fn run_task<V, W, P>(
    task: Task,
    vcs: &V,
    config: &Config,
    args: &TaskArgs,
    out: &mut W,
    prompt: P,
) -> Result<TaskOutcome>
where
    V: VcsClient + ?Sized,
    W: Write,
    P: FnOnce() -> Result<String>,
{
    debug!(?task, "running task");

    match task {
        Task::Changelog => {
            let report = git_ops::build_changelog(
                vcs,
                config,
                args.overrides.from.as_deref(),
                args.overrides.version.as_deref(),
                args.today,
            )?;

            match report {
                Some(report) => {
                    out.write_all(report.as_bytes())?;
                    Ok(TaskOutcome::Changelog { printed: true })
                }
                None => Ok(TaskOutcome::Changelog { printed: false }),
            }
        }
        Task::Manifest => {
            let (path, entries) = manifest::sync_manifest(vcs, &config.manifest)?;
            Ok(TaskOutcome::Manifest {
                path: path.display().to_string(),
                entries,
            })
        }
        Task::Tags => {
            let tags = git_ops::discover_tags(vcs, &config.tag_prefix)?;
            for tag in &tags {
                writeln!(out, "{}", tag)?;
            }
            Ok(TaskOutcome::Tags(tags))
        }
        Task::ReleaseSanity => {
            git_ops::release_sanity(vcs)?;
            Ok(TaskOutcome::Clean)
        }
        Task::Tag => tag(vcs, config, args, prompt),
        Task::Release => {
            git_ops::release_sanity(vcs)?;
            tag(vcs, config, args, prompt)
        }
    }
}

fn tag<V, P>(vcs: &V, config: &Config, args: &TaskArgs, prompt: P) -> Result<TaskOutcome>
where
    V: VcsClient + ?Sized,
    P: FnOnce() -> Result<String>,
{
    let tag = resolve_tag_name(&args.overrides, config, vcs.workdir())?;

    let message = match &args.overrides.message {
        Some(message) => non_empty_message(message),
        None if config.ask_tag_message => non_empty_message(&prompt()?),
        None => None,
    };

    let outcome = git_ops::tag_and_push(vcs, config, &tag, message.as_deref())?;
    Ok(TaskOutcome::Tagged(outcome))
}
