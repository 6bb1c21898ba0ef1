use crate::error::Result;
use crate::git::GitBackend;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock git backend for testing without actual repositories
///
/// Every project starts clean on `main` with no tags and no commits. Commits
/// and tags created through the trait are recorded per project path.
#[derive(Debug, Default)]
pub struct MockGit {
    dirty: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
    branches: HashMap<PathBuf, String>,
    tags: HashMap<PathBuf, String>,
    logs: HashMap<PathBuf, Vec<String>>,
    commits: Mutex<Vec<(PathBuf, String)>>,
    created_tags: Mutex<Vec<(PathBuf, String)>>,
}

impl MockGit {
    /// Create a new mock backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Report uncommitted changes for a project
    pub fn set_dirty(&mut self, path: impl Into<PathBuf>) {
        self.dirty.insert(path.into());
    }

    /// Make commit and tag fail for a project
    pub fn set_failing(&mut self, path: impl Into<PathBuf>) {
        self.failing.insert(path.into());
    }

    /// Set the checked-out branch of a project
    pub fn set_branch(&mut self, path: impl Into<PathBuf>, branch: impl Into<String>) {
        self.branches.insert(path.into(), branch.into());
    }

    /// Set the latest release tag of a project
    pub fn set_latest_tag(&mut self, path: impl Into<PathBuf>, tag: impl Into<String>) {
        self.tags.insert(path.into(), tag.into());
    }

    /// Set the commit messages returned for a project, newest first
    pub fn set_log<I, S>(&mut self, path: impl Into<PathBuf>, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.logs
            .insert(path.into(), messages.into_iter().map(Into::into).collect());
    }

    /// Commits recorded so far, as (project path, message)
    pub fn commits(&self) -> Vec<(PathBuf, String)> {
        self.commits
            .lock()
            .map(|commits| commits.clone())
            .unwrap_or_default()
    }

    /// Tags recorded so far, as (project path, label)
    pub fn created_tags(&self) -> Vec<(PathBuf, String)> {
        self.created_tags
            .lock()
            .map(|tags| tags.clone())
            .unwrap_or_default()
    }

    fn check(&self, path: &Path, operation: &str) -> Result<()> {
        if self.failing.contains(path) {
            let message = format!("mock {} failed for {}", operation, path.display());
            return Err(git2::Error::from_str(&message).into());
        }
        Ok(())
    }
}

impl GitBackend for MockGit {
    fn is_clean(&self, path: &Path) -> Result<bool> {
        Ok(!self.dirty.contains(path))
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        Ok(self
            .branches
            .get(path)
            .cloned()
            .unwrap_or_else(|| "main".to_string()))
    }

    fn latest_tag(&self, path: &Path, prefix: &str) -> Result<Option<String>> {
        Ok(self
            .tags
            .get(path)
            .filter(|tag| tag.starts_with(prefix))
            .cloned())
    }

    fn commit_log(&self, path: &Path, _since: Option<&str>) -> Result<Vec<String>> {
        Ok(self.logs.get(path).cloned().unwrap_or_default())
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        self.check(path, "commit")?;
        if let Ok(mut commits) = self.commits.lock() {
            commits.push((path.to_path_buf(), message.to_string()));
        }
        Ok(())
    }

    fn tag(&self, path: &Path, label: &str) -> Result<()> {
        self.check(path, "tag")?;
        if let Ok(mut tags) = self.created_tags.lock() {
            tags.push((path.to_path_buf(), label.to_string()));
        }
        Ok(())
    }
}
