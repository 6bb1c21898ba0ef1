//! Pure formatting functions for UI output.
//!
//! Table and report builders return strings so they can be tested; the
//! `display_*` wrappers print them.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::orchestration::{BatchReport, ReleaseDetails};
use crate::domain::Project;

/// One row of the `status` table
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRow {
    pub name: String,
    pub version: String,
    pub branch: String,
    pub clean: bool,
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(str::len).fold(header.len(), usize::max)
}

/// Table of discovered projects
pub fn format_project_table(projects: &[Project]) -> String {
    let name_w = column_width("Name", projects.iter().map(|p| p.name.as_str()));
    let version_w = column_width("Version", projects.iter().map(|p| p.version.as_str()));

    let mut out = format!(
        "{:<name_w$}  {:<version_w$}  {}\n",
        "Name", "Version", "Path / Description"
    );
    for project in projects {
        let location = match &project.description {
            Some(description) => format!("{} - {}", project.path.display(), description),
            None => project.path.display().to_string(),
        };
        out.push_str(&format!(
            "{:<name_w$}  {:<version_w$}  {}\n",
            project.name, project.version, location
        ));
    }
    out
}

/// Table of project git state
pub fn format_status_table(rows: &[StatusRow]) -> String {
    let name_w = column_width("Project", rows.iter().map(|r| r.name.as_str()));
    let version_w = column_width("Version", rows.iter().map(|r| r.version.as_str()));
    let branch_w = column_width("Branch", rows.iter().map(|r| r.branch.as_str()));

    let mut out = format!(
        "{:<name_w$}  {:<version_w$}  {:<branch_w$}  {}\n",
        "Project", "Version", "Branch", "Status"
    );
    for row in rows {
        let state = if row.clean { "Clean" } else { "Dirty" };
        out.push_str(&format!(
            "{:<name_w$}  {:<version_w$}  {:<branch_w$}  {}\n",
            row.name, row.version, row.branch, state
        ));
    }
    out
}

/// One-line description of a completed release
pub fn format_release(name: &str, details: &ReleaseDetails) -> String {
    format!(
        "{} {} -> {} (tag {}, {} files updated)",
        name,
        details.old_version,
        details.new_version,
        details.tag,
        details.changed_files.len()
    )
}

/// Summary of a release run
pub fn format_batch_summary(report: &BatchReport) -> String {
    let mut out = format!(
        "Released: {}  Skipped: {}  Failed: {}\n",
        report.released.len(),
        report.skipped.len(),
        report.failed.len()
    );
    for (name, reason) in &report.skipped {
        out.push_str(&format!("  skipped {}: {}\n", name, reason));
    }
    for (name, reason) in &report.failed {
        out.push_str(&format!("  failed {}: {}\n", name, reason));
    }
    out
}

pub fn display_projects(projects: &[Project]) {
    if projects.is_empty() {
        display_status("No projects found.");
        return;
    }
    println!("{}", style("Discovered projects:").bold());
    print!("{}", format_project_table(projects));
}

pub fn display_status_table(rows: &[StatusRow]) {
    if rows.is_empty() {
        display_status("No projects found.");
        return;
    }
    print!("{}", format_status_table(rows));
}

/// Print each release with its warnings, then the totals
pub fn display_batch_summary(report: &BatchReport) {
    for (name, details) in &report.released {
        display_success(&format_release(name, details));
        for warning in &details.warnings {
            display_boundary_warning(warning);
        }
    }

    println!("\n{}", style("Summary").bold().underlined());
    print!("{}", format_batch_summary(report));
}
