//! Project discovery under a root directory
//!
//! A project is a directory holding a `pyproject.toml` whose `[project]`
//! table declares both `name` and `version`.

use crate::domain::project::MANIFEST_FILE;
use crate::domain::Project;
use crate::error::{RelmError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Target name selecting every discovered project
pub const ALL_TARGET: &str = "all";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    project: Option<ProjectTable>,
}

#[derive(Debug, Deserialize)]
struct ProjectTable {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
}

/// How the selected projects are released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
    /// One explicitly named project; errors are fatal
    Single,
    /// Every project; errors are isolated per project
    Batch,
}

/// Load the project rooted at `dir`, if any
pub fn load_project(dir: &Path) -> Result<Option<Project>> {
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&manifest_path).map_err(|e| RelmError::io(&manifest_path, e))?;
    let manifest: Manifest = match toml::from_str(&content) {
        Ok(manifest) => manifest,
        Err(e) => {
            warn!(path = %manifest_path.display(), error = %e, "Ignoring unreadable manifest");
            return Ok(None);
        }
    };

    let Some(table) = manifest.project else {
        debug!(path = %manifest_path.display(), "Manifest has no [project] table");
        return Ok(None);
    };

    match (table.name, table.version) {
        (Some(name), Some(version)) => {
            let mut project = Project::new(name, version, dir);
            project.description = table.description;
            Ok(Some(project))
        }
        _ => {
            debug!(path = %manifest_path.display(), "Manifest lacks name or version");
            Ok(None)
        }
    }
}

/// Find the project at `root` and in each immediate, non-hidden subdirectory
///
/// Results are sorted by name. A missing root yields no projects.
pub fn find_projects(root: &Path) -> Result<Vec<Project>> {
    let mut projects = Vec::new();
    if !root.is_dir() {
        return Ok(projects);
    }

    if let Some(project) = load_project(root)? {
        projects.push(project);
    }

    let entries = fs::read_dir(root).map_err(|e| RelmError::io(root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| RelmError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if let Some(project) = load_project(&path)? {
            projects.push(project);
        }
    }

    projects.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(root = %root.display(), count = projects.len(), "Discovered projects");
    Ok(projects)
}

/// Resolve a release target (`all` or a project name) against discovered projects
pub fn select_targets(
    projects: Vec<Project>,
    target: &str,
    root: &Path,
) -> Result<(Vec<Project>, ReleaseMode)> {
    if target == ALL_TARGET {
        return Ok((projects, ReleaseMode::Batch));
    }

    projects
        .into_iter()
        .find(|p| p.name == target)
        .map(|p| (vec![p], ReleaseMode::Single))
        .ok_or_else(|| RelmError::ProjectNotFound {
            name: target.to_string(),
            root: root.to_path_buf(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Vec<Project> {
        vec![
            Project::new("api", "1.0.0", "/work/api"),
            Project::new("core", "0.3.0", "/work/core"),
        ]
    }

    #[test]
    fn test_select_all_is_batch() {
        let (projects, mode) = select_targets(sample(), "all", Path::new("/work")).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(mode, ReleaseMode::Batch);
    }

    #[test]
    fn test_select_named_is_single() {
        let (projects, mode) = select_targets(sample(), "core", Path::new("/work")).unwrap();
        assert_eq!(projects[0].path, PathBuf::from("/work/core"));
        assert_eq!(mode, ReleaseMode::Single);
    }

    #[test]
    fn test_select_unknown_is_not_found() {
        let result = select_targets(sample(), "ghost", Path::new("/work"));
        assert!(matches!(
            result,
            Err(RelmError::ProjectNotFound { ref name, .. }) if name == "ghost"
        ));
    }

    #[test]
    fn test_find_projects_missing_root() {
        let projects = find_projects(Path::new("/nonexistent/relm-root")).unwrap();
        assert!(projects.is_empty());
    }
}
