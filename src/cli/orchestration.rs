//! Release workflow orchestration
//!
//! Runs the per-project release sequence (bump, patch, changelog, commit, tag)
//! and aggregates outcomes across a batch. Nothing here prints; callers
//! render the returned [BatchReport].

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::boundary::BoundaryWarning;
use crate::changelog::{self, ChangelogGenerator};
use crate::config::ReleaseOptions;
use crate::discovery::{load_project, ReleaseMode};
use crate::domain::{bump_version_string, Project};
use crate::error::{RelmError, Result};
use crate::git::GitBackend;
use crate::patch::{patch_test_literals, LiteralPatcher, VersionPatcher};

/// Asks the operator whether a release may proceed
pub trait Confirm {
    fn confirm(&self, project: &Project, old_version: &str, new_version: &str) -> Result<bool>;
}

/// Approves every release without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _project: &Project, _old: &str, _new: &str) -> Result<bool> {
        Ok(true)
    }
}

/// What a completed release did
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDetails {
    pub old_version: String,
    pub new_version: String,
    pub tag: String,
    /// Rewritten files, relative to the project directory
    pub changed_files: Vec<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Result of releasing one project
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    Released(ReleaseDetails),
    Skipped(String),
    Failed(String),
}

/// Outcomes of one orchestrator run, grouped by kind in processing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub released: Vec<(String, ReleaseDetails)>,
    pub skipped: Vec<(String, String)>,
    pub failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn record(&mut self, name: &str, outcome: ReleaseOutcome) {
        let name = name.to_string();
        match outcome {
            ReleaseOutcome::Released(details) => self.released.push((name, details)),
            ReleaseOutcome::Skipped(reason) => self.skipped.push((name, reason)),
            ReleaseOutcome::Failed(reason) => self.failed.push((name, reason)),
        }
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    pub fn released_names(&self) -> Vec<&str> {
        self.released.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn skipped_names(&self) -> Vec<&str> {
        self.skipped.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.released.is_empty() && self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Releases projects one at a time
///
/// Each project is fully processed before the next one starts. A failed
/// project keeps whatever files were already rewritten.
pub struct ReleaseOrchestrator<G: GitBackend> {
    git: G,
    patcher: Box<dyn VersionPatcher>,
    confirm: Box<dyn Confirm>,
    options: ReleaseOptions,
    date: Option<NaiveDate>,
}

impl<G: GitBackend> ReleaseOrchestrator<G> {
    pub fn new(git: G, options: ReleaseOptions) -> Self {
        ReleaseOrchestrator {
            git,
            patcher: Box::new(LiteralPatcher),
            confirm: Box::new(AlwaysConfirm),
            options,
            date: None,
        }
    }

    pub fn with_patcher(mut self, patcher: Box<dyn VersionPatcher>) -> Self {
        self.patcher = patcher;
        self
    }

    pub fn with_confirm(mut self, confirm: Box<dyn Confirm>) -> Self {
        self.confirm = confirm;
        self
    }

    /// Fix the changelog date instead of using today
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn options(&self) -> &ReleaseOptions {
        &self.options
    }

    /// Release `projects` according to `mode`
    ///
    /// In single mode the first error is returned as-is; in batch mode errors
    /// are recorded per project.
    pub fn run(&self, projects: &[Project], mode: ReleaseMode) -> Result<BatchReport> {
        match mode {
            ReleaseMode::Single => {
                let mut report = BatchReport::default();
                for project in projects {
                    report.record(&project.name, self.release_single(project)?);
                }
                Ok(report)
            }
            ReleaseMode::Batch => Ok(self.run_batch(projects)),
        }
    }

    /// Release an explicitly named project; the dirty-tree guard does not apply
    pub fn release_single(&self, project: &Project) -> Result<ReleaseOutcome> {
        self.release_project(project, false)
    }

    /// Release every project, isolating failures
    ///
    /// Stops after the first failure when `fail_fast` is set.
    pub fn run_batch(&self, projects: &[Project]) -> BatchReport {
        let mut report = BatchReport::default();

        for project in projects {
            let outcome = match self.release_project(project, self.options.check_dirty) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(project = %project.name, error = %e, "Release failed");
                    ReleaseOutcome::Failed(e.to_string())
                }
            };

            let failed = matches!(outcome, ReleaseOutcome::Failed(_));
            report.record(&project.name, outcome);

            if failed && self.options.fail_fast {
                warn!(project = %project.name, "Stopping batch after failure");
                break;
            }
        }

        report
    }

    /// Run the release sequence for one project
    pub fn release_project(&self, project: &Project, check_dirty: bool) -> Result<ReleaseOutcome> {
        let current = load_project(&project.path)?
            .map(|p| p.version)
            .ok_or_else(|| {
                RelmError::manifest(format!(
                    "No readable project manifest in {}",
                    project.path.display()
                ))
            })?;
        let next = bump_version_string(&current, self.options.bump)?;

        if check_dirty && !self.git.is_clean(&project.path)? {
            info!(project = %project.name, "Skipping project with uncommitted changes");
            return Ok(ReleaseOutcome::Skipped("uncommitted changes".to_string()));
        }

        let tag = self.options.tag_pattern.format(&project.name, &next);

        if self.options.dry_run {
            return Ok(ReleaseOutcome::Skipped(format!(
                "dry run: {} -> {} ({})",
                current, next, tag
            )));
        }

        if !self.options.auto_confirm && !self.confirm.confirm(project, &current, &next)? {
            return Ok(ReleaseOutcome::Skipped("declined by user".to_string()));
        }

        let mut changed_files = Vec::new();
        let mut warnings = Vec::new();

        self.patch_version_files(project, &current, &next, &mut changed_files, &mut warnings);

        let literals =
            patch_test_literals(&project.path, &self.options.files.tests_dir, &current, &next);
        changed_files.extend(literals.changed);
        warnings.extend(literals.warnings);

        self.write_changelog(project, &next, &mut changed_files, &mut warnings)?;

        let message = self.options.commit_message_for(&project.name, &next);
        self.git.commit(&project.path, &message)?;
        self.git.tag(&project.path, &tag)?;

        info!(project = %project.name, from = %current, to = %next, %tag, "Released project");
        Ok(ReleaseOutcome::Released(ReleaseDetails {
            old_version: current,
            new_version: next,
            tag,
            changed_files,
            warnings,
        }))
    }

    fn patch_version_files(
        &self,
        project: &Project,
        current: &str,
        next: &str,
        changed_files: &mut Vec<PathBuf>,
        warnings: &mut Vec<BoundaryWarning>,
    ) {
        let manifest = project.manifest_path();
        let mut targets = vec![manifest.clone()];
        targets.extend(project.version_constant_paths());
        targets.extend(self.options.files.version_files.iter().map(|f| project.join(f)));

        for path in targets {
            match self.patcher.patch(&path, current, next) {
                Ok(true) => changed_files.push(relative_to(&project.path, &path)),
                Ok(false) if path == manifest => {
                    warnings.push(BoundaryWarning::ManifestUnchanged {
                        path,
                        version: current.to_string(),
                    });
                }
                Ok(false) => {}
                Err(e) => warnings.push(BoundaryWarning::PatchFailed {
                    path,
                    reason: e.to_string(),
                }),
            }
        }
    }

    fn write_changelog(
        &self,
        project: &Project,
        next: &str,
        changed_files: &mut Vec<PathBuf>,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<()> {
        let prefix = self.options.tag_pattern.prefix(&project.name);
        let mut generator = ChangelogGenerator::new(&self.git, prefix);
        if let Some(date) = self.date {
            generator = generator.with_date(date);
        }

        let section = generator.generate(&project.path, next)?;
        if section.commit_count == 0 {
            warnings.push(BoundaryWarning::NoNewCommits {
                latest_tag: section.since_tag.clone(),
            });
        }

        let path = project.join(&self.options.files.changelog);
        match changelog::update_file(&path, &section.render()) {
            Ok(()) => changed_files.push(self.options.files.changelog.clone()),
            Err(e) => warnings.push(BoundaryWarning::ChangelogFailed {
                path,
                reason: e.to_string(),
            }),
        }

        Ok(())
    }
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
