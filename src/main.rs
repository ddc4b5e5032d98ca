use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_release::cli::{run_task, Task, TaskArgs, TaskOutcome};
use git_release::config::{self, Overrides};
use git_release::git::GitRepository;
use git_release::ui;

#[derive(Parser)]
#[command(
    name = "git-release",
    version,
    about = "Print changelogs, sync the manifest and push release tags from git history"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Repository to operate on"
    )]
    repo: String,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the changelog since the last release tag
    Changelog {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Update the manifest with git's file list
    Manifest,
    /// Create and push a release tag
    Tag {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Print the discovered release tags
    Tags,
    /// Abort unless the working tree is clean
    #[command(name = "release-sanity", alias = "release_sanity")]
    ReleaseSanity,
    /// Check the working tree, then create and push a release tag
    Release {
        #[command(flatten)]
        overrides: OverrideArgs,
    },
}

#[derive(ClapArgs, Default)]
struct OverrideArgs {
    #[arg(long, help = "Start the changelog at this ref instead of the last tag [env: FROM]")]
    from: Option<String>,

    #[arg(long = "release-version", help = "Version to release or label the changelog with [env: VERSION]")]
    release_version: Option<String>,

    #[arg(long, help = "Prerelease suffix appended as .<pre> [env: PRERELEASE, PRE]")]
    prerelease: Option<String>,

    #[arg(long, help = "Exact tag name to create [env: TAG]")]
    tag: Option<String>,

    #[arg(short, long, help = "Tag message; skips the prompt")]
    message: Option<String>,
}

impl From<OverrideArgs> for Overrides {
    fn from(args: OverrideArgs) -> Self {
        Overrides {
            from: args.from,
            version: args.release_version,
            prerelease: args.prerelease,
            tag: args.tag,
            message: args.message,
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let (task, flags) = match args.command {
        Command::Changelog { overrides } => (Task::Changelog, overrides),
        Command::Manifest => (Task::Manifest, OverrideArgs::default()),
        Command::Tag { overrides } => (Task::Tag, overrides),
        Command::Tags => (Task::Tags, OverrideArgs::default()),
        Command::ReleaseSanity => (Task::ReleaseSanity, OverrideArgs::default()),
        Command::Release { overrides } => (Task::Release, overrides),
    };

    let task_args = TaskArgs {
        overrides: Overrides::from_env().merge(flags.into()),
        today: chrono::Local::now().date_naive(),
    };

    let vcs = GitRepository::open(&args.repo)
        .with_context(|| format!("Not in a git repository: {}", args.repo))?;

    let mut stdout = std::io::stdout().lock();
    let outcome = match run_task(
        task,
        &vcs,
        &config,
        &task_args,
        &mut stdout,
        ui::prompt_tag_message,
    ) {
        Ok(outcome) => outcome,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    match outcome {
        TaskOutcome::Manifest { path, entries } => {
            ui::display_success(&format!("Wrote {} entries to {}", entries, path));
        }
        TaskOutcome::Tagged(outcome) => ui::display_tag_outcome(&outcome),
        TaskOutcome::Changelog { .. } | TaskOutcome::Tags(_) | TaskOutcome::Clean => {}
    }

    Ok(())
}
