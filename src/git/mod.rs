//! Git operations abstraction layer
//!
//! The release engine only talks to git through the [GitBackend] trait:
//!
//! - [repository::Git2Backend]: a real implementation using the `git2` crate
//! - [mock::MockGit]: a scripted implementation for tests
//!
//! Every operation takes the project directory. Implementations resolve the
//! enclosing repository themselves, so sibling projects may live in separate
//! repositories or share one.

pub mod mock;
pub mod repository;

pub use mock::MockGit;
pub use repository::Git2Backend;

use crate::error::Result;
use std::path::Path;

/// Git operations needed to release a project
pub trait GitBackend {
    /// Whether the project directory has no uncommitted or untracked changes
    fn is_clean(&self, path: &Path) -> Result<bool>;

    /// Name of the checked-out branch
    fn current_branch(&self, path: &Path) -> Result<String>;

    /// Most recent tag reachable from HEAD whose name starts with `prefix`
    fn latest_tag(&self, path: &Path, prefix: &str) -> Result<Option<String>>;

    /// Raw commit messages touching the project, newest first
    ///
    /// When `since` names a tag, commits reachable from that tag are excluded.
    fn commit_log(&self, path: &Path, since: Option<&str>) -> Result<Vec<String>>;

    /// Stage every change under the project directory and commit it
    fn commit(&self, path: &Path, message: &str) -> Result<()>;

    /// Create a tag on HEAD
    fn tag(&self, path: &Path, label: &str) -> Result<()>;
}

impl<G: GitBackend + ?Sized> GitBackend for &G {
    fn is_clean(&self, path: &Path) -> Result<bool> {
        (**self).is_clean(path)
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        (**self).current_branch(path)
    }

    fn latest_tag(&self, path: &Path, prefix: &str) -> Result<Option<String>> {
        (**self).latest_tag(path, prefix)
    }

    fn commit_log(&self, path: &Path, since: Option<&str>) -> Result<Vec<String>> {
        (**self).commit_log(path, since)
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        (**self).commit(path, message)
    }

    fn tag(&self, path: &Path, label: &str) -> Result<()> {
        (**self).tag(path, label)
    }
}
