//! Literal version rewriting in manifests, version constants and test files
//!
//! Rewriting is text based: only exact quoted literals of the old
//! version are touched, so `"1.0"` never matches inside `"1.0.0"` and
//! `"v1.0.0-legacy"` is left alone. It will still rewrite an unrelated string
//! that happens to equal the old version exactly.

use crate::boundary::BoundaryWarning;
use crate::error::{RelmError, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Keys whose quoted value is treated as the project version
const VERSION_KEYS: [&str; 2] = ["version", "__version__"];

const QUOTES: [char; 2] = ['"', '\''];

/// Rewrites version literals inside a single file
///
/// Implementations return `Ok(false)` when the file is absent or holds no
/// matching literal.
pub trait VersionPatcher {
    fn patch(&self, path: &Path, old_version: &str, new_version: &str) -> Result<bool>;
}

/// Matches `version = "X"` and `__version__ = "X"` assignments
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralPatcher;

impl VersionPatcher for LiteralPatcher {
    fn patch(&self, path: &Path, old_version: &str, new_version: &str) -> Result<bool> {
        patch_file(path, old_version, new_version)
    }
}

/// Rewrite version assignments in `path`, returning whether the file changed
pub fn patch_file(path: &Path, old_version: &str, new_version: &str) -> Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }

    let content = fs::read_to_string(path).map_err(|e| RelmError::io(path, e))?;
    let updated = rewrite_assignments(&content, old_version, new_version)?;

    if updated == content {
        return Ok(false);
    }

    fs::write(path, updated).map_err(|e| RelmError::io(path, e))?;
    debug!(path = %path.display(), old_version, new_version, "Rewrote version assignment");
    Ok(true)
}

/// Replace quoted version assignments in `content`, preserving spacing and quote style
pub fn rewrite_assignments(content: &str, old_version: &str, new_version: &str) -> Result<String> {
    let mut text = content.to_string();

    for key in VERSION_KEYS {
        for quote in QUOTES {
            let pattern = format!(
                r"\b({}\s*=\s*){}{}{}",
                regex::escape(key),
                quote,
                regex::escape(old_version),
                quote
            );
            let re = Regex::new(&pattern)
                .map_err(|e| RelmError::parse(format!("Bad version pattern: {}", e)))?;

            text = re
                .replace_all(&text, |caps: &Captures| {
                    format!("{}{}{}{}", &caps[1], quote, new_version, quote)
                })
                .into_owned();
        }
    }

    Ok(text)
}

/// Replace every exact single- or double-quoted literal of the old version
pub fn rewrite_quoted_literals(content: &str, old_version: &str, new_version: &str) -> String {
    QUOTES.iter().fold(content.to_string(), |text, quote| {
        text.replace(
            &format!("{quote}{old_version}{quote}"),
            &format!("{quote}{new_version}{quote}"),
        )
    })
}

/// Outcome of rewriting test literals
///
/// A file that cannot be read or written is recorded in `warnings` and the
/// walk moves on, so `changed` always lists what was actually rewritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestPatchReport {
    pub changed: Vec<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

impl TestPatchReport {
    fn fail(&mut self, project_root: &Path, path: &Path, reason: impl ToString) {
        let relative = path.strip_prefix(project_root).unwrap_or(path);
        let reason = reason.to_string();
        warn!(path = %relative.display(), %reason, "Could not patch test file");
        self.warnings.push(BoundaryWarning::PatchFailed {
            path: relative.to_path_buf(),
            reason,
        });
    }
}

/// Rewrite quoted version literals under `project_root/tests_dir`
///
/// Paths in the report are relative to `project_root`, in walk order.
/// Files that are not valid UTF-8 are skipped. Symlinked files are read
/// through the link; symlinked directories are not descended.
pub fn patch_test_literals(
    project_root: &Path,
    tests_dir: &Path,
    old_version: &str,
    new_version: &str,
) -> TestPatchReport {
    let root = project_root.join(tests_dir);
    let mut report = TestPatchReport::default();

    if !root.is_dir() {
        return report;
    }

    let walker = WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "__pycache__");

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                report.fail(project_root, &path, e);
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();
        let is_file = if file_type.is_symlink() {
            fs::metadata(path).map(|meta| meta.is_file())
        } else {
            Ok(file_type.is_file())
        };
        match is_file {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => {
                report.fail(project_root, path, e);
                continue;
            }
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                report.fail(project_root, path, e);
                continue;
            }
        };
        let Ok(content) = String::from_utf8(bytes) else {
            debug!(path = %path.display(), "Skipping non-UTF-8 test file");
            continue;
        };

        let updated = rewrite_quoted_literals(&content, old_version, new_version);
        if updated == content {
            continue;
        }

        if let Err(e) = fs::write(path, updated) {
            report.fail(project_root, path, e);
            continue;
        }
        let relative = path.strip_prefix(project_root).unwrap_or(path);
        report.changed.push(relative.to_path_buf());
    }

    report
}
