use crate::domain::Version;
use crate::error::{RelmError, Result};
use crate::git::GitBackend;
use git2::{
    Commit, DiffOptions, ErrorCode, IndexAddOption, Oid, Repository, Sort, StatusOptions,
};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// [GitBackend] backed by libgit2
///
/// The repository is discovered from the project directory on every call, so
/// one backend serves projects living in different repositories.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Backend;

impl Git2Backend {
    pub fn new() -> Self {
        Git2Backend
    }

    fn open(path: &Path) -> Result<Repository> {
        Ok(Repository::discover(path)?)
    }
}

/// Commit at HEAD, or `None` on a branch with no commits yet
fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if e.code() == ErrorCode::UnbornBranch => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Project directory relative to the work tree, as a git pathspec
///
/// `None` when the project is the repository root.
fn project_pathspec(repo: &Repository, path: &Path) -> Result<Option<String>> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| git2::Error::from_str("bare repositories are not supported"))?;
    let workdir = workdir.canonicalize().map_err(|e| RelmError::io(workdir, e))?;
    let project = path.canonicalize().map_err(|e| RelmError::io(path, e))?;

    let relative = project.strip_prefix(&workdir).map_err(|_| {
        git2::Error::from_str(&format!(
            "{} is outside the repository at {}",
            project.display(),
            workdir.display()
        ))
    })?;

    if relative.as_os_str().is_empty() {
        return Ok(None);
    }

    let spec = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok(Some(spec))
}

fn touches_path(repo: &Repository, commit: &Commit<'_>, pathspec: &str) -> Result<bool> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let mut opts = DiffOptions::new();
    opts.pathspec(pathspec);
    let diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
    Ok(diff.deltas().len() > 0)
}

impl GitBackend for Git2Backend {
    fn is_clean(&self, path: &Path) -> Result<bool> {
        let repo = Self::open(path)?;

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);
        if let Some(spec) = project_pathspec(&repo, path)? {
            opts.pathspec(spec);
        }

        let statuses = repo.statuses(Some(&mut opts))?;
        debug!(path = %path.display(), changes = statuses.len(), "Checked working tree");
        Ok(statuses.is_empty())
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        let repo = Self::open(path)?;

        let branch = match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().unwrap_or("HEAD").to_string(),
            Ok(_) => "HEAD (detached)".to_string(),
            Err(e) if e.code() == ErrorCode::UnbornBranch => {
                let head = repo.find_reference("HEAD")?;
                let name = head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .unwrap_or("HEAD")
                    .to_string();
                name
            }
            Err(e) => return Err(e.into()),
        };
        Ok(branch)
    }

    fn latest_tag(&self, path: &Path, prefix: &str) -> Result<Option<String>> {
        let repo = Self::open(path)?;
        let Some(head) = head_commit(&repo)? else {
            return Ok(None);
        };

        // Handles both lightweight and annotated tags
        let mut tagged: HashMap<Oid, Vec<String>> = HashMap::new();
        let names = repo.tag_names(None)?;
        for name in names.iter().flatten() {
            if !name.starts_with(prefix) {
                continue;
            }
            let target = repo
                .find_reference(&format!("refs/tags/{}", name))
                .and_then(|reference| reference.peel_to_commit());
            if let Ok(commit) = target {
                tagged
                    .entry(commit.id())
                    .or_default()
                    .push(name.to_string());
            }
        }

        if tagged.is_empty() {
            return Ok(None);
        }

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        for oid in revwalk {
            if let Some(names) = tagged.get(&oid?) {
                // Several tags on one commit: prefer the highest version
                let latest = names
                    .iter()
                    .max_by_key(|name| Version::parse(&name[prefix.len()..]).ok())
                    .cloned();
                return Ok(latest);
            }
        }

        Ok(None)
    }

    fn commit_log(&self, path: &Path, since: Option<&str>) -> Result<Vec<String>> {
        let repo = Self::open(path)?;
        let Some(head) = head_commit(&repo)? else {
            return Ok(Vec::new());
        };
        let spec = project_pathspec(&repo, path)?;

        let mut revwalk = repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;

        if let Some(tag) = since {
            let reference = repo.find_reference(&format!("refs/tags/{}", tag))?;
            revwalk.hide(reference.peel_to_commit()?.id())?;
        }

        let mut messages = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            if let Some(spec) = &spec {
                if !touches_path(&repo, &commit, spec)? {
                    continue;
                }
            }
            messages.push(commit.message().unwrap_or_default().trim().to_string());
        }

        debug!(path = %path.display(), since, count = messages.len(), "Collected commit log");
        Ok(messages)
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        let repo = Self::open(path)?;
        let spec = project_pathspec(&repo, path)?.unwrap_or_else(|| "*".to_string());

        let mut index = repo.index()?;
        index.add_all([spec.as_str()], IndexAddOption::DEFAULT, None)?;
        index.update_all([spec.as_str()], None)?;
        index.write()?;

        let tree = repo.find_tree(index.write_tree()?)?;
        let signature = repo.signature()?;
        let parent = head_commit(&repo)?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!(path = %path.display(), %oid, "Created release commit");
        Ok(())
    }

    fn tag(&self, path: &Path, label: &str) -> Result<()> {
        let repo = Self::open(path)?;
        let head = head_commit(&repo)?
            .ok_or_else(|| git2::Error::from_str("cannot tag a branch with no commits"))?;

        repo.tag_lightweight(label, head.as_object(), false)?;
        debug!(path = %path.display(), tag = label, "Created tag");
        Ok(())
    }
}
