//! Command-line surface: argument parsing, logging setup and command dispatch

pub mod orchestration;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, ReleaseOptions, ReleaseOverrides};
use crate::discovery::{find_projects, select_targets, ReleaseMode, ALL_TARGET};
use crate::domain::BumpKind;
use crate::git::{Git2Backend, GitBackend};
use crate::ui::{self, StatusRow, TerminalConfirm};
use orchestration::ReleaseOrchestrator;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "RELM_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "relm",
    version,
    about = "Bump versions, write changelogs and tag releases across sibling projects"
)]
pub struct Cli {
    #[arg(short, long, global = true, default_value = ".", help = "Root directory to scan for projects")]
    pub path: PathBuf,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List discovered projects
    List,

    /// Show branch and working tree state of projects
    Status {
        #[arg(default_value = ALL_TARGET, help = "Project name or 'all'")]
        project: String,
    },

    /// Bump, patch, changelog, commit and tag
    Release {
        #[arg(help = "Project name or 'all'")]
        project: String,

        #[arg(default_value = "patch", help = "major, minor, patch, alpha, beta, rc or release")]
        kind: BumpKind,

        #[arg(short, long, help = "Skip confirmation prompts")]
        yes: bool,

        #[arg(long, help = "Stop a batch release at the first failure")]
        fail_fast: bool,

        #[arg(long, help = "Release projects with uncommitted changes in batch mode")]
        no_check_dirty: bool,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
}

/// Install the stderr log subscriber
///
/// `RELM_LOG` takes precedence over the `-v` count.
pub fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("relm={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref(), &cli.path)
        .context("Failed to load configuration")?;
    let projects = find_projects(&cli.path)?;

    match cli.command {
        Command::List => {
            ui::display_projects(&projects);
            Ok(ExitCode::SUCCESS)
        }
        Command::Status { project } => {
            let (targets, _) = select_targets(projects, &project, &cli.path)?;
            ui::display_status_table(&status_rows(&Git2Backend::new(), &targets));
            Ok(ExitCode::SUCCESS)
        }
        Command::Release {
            project,
            kind,
            yes,
            fail_fast,
            no_check_dirty,
            dry_run,
        } => {
            let overrides = ReleaseOverrides {
                yes,
                fail_fast,
                no_check_dirty,
                dry_run,
            };
            let options = ReleaseOptions::resolve(&config, kind, &overrides)?;
            let (targets, mode) = select_targets(projects, &project, &cli.path)?;

            if targets.is_empty() {
                ui::display_status("No projects found.");
                return Ok(ExitCode::SUCCESS);
            }

            ui::display_status(&format!(
                "Releasing {} project(s) with a {} bump",
                targets.len(),
                kind
            ));

            let orchestrator = ReleaseOrchestrator::new(Git2Backend::new(), options)
                .with_confirm(Box::new(TerminalConfirm));
            let report = orchestrator.run(&targets, mode)?;
            ui::display_batch_summary(&report);

            let failed = match mode {
                ReleaseMode::Single => report.has_failures(),
                ReleaseMode::Batch => report.has_failures() && orchestrator.options().fail_fast,
            };
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}

fn status_rows<G: GitBackend>(git: &G, projects: &[crate::domain::Project]) -> Vec<StatusRow> {
    projects
        .iter()
        .map(|project| {
            let branch = git.current_branch(&project.path).unwrap_or_else(|e| {
                warn!(project = %project.name, error = %e, "Could not read branch");
                "-".to_string()
            });
            let clean = git.is_clean(&project.path).unwrap_or_else(|e| {
                warn!(project = %project.name, error = %e, "Could not read working tree");
                false
            });
            StatusRow {
                name: project.name.clone(),
                version: project.version.clone(),
                branch,
                clean,
            }
        })
        .collect()
}
