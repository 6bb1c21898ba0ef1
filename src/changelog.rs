//! Changelog generation from conventional commits
//!
//! A changelog is a markdown document with a `# Title` first line followed by
//! `## [version] - date` sections, newest first. New sections are inserted
//! directly below the title; existing sections are never touched.

use crate::domain::ParsedCommit;
use crate::error::{RelmError, Result};
use crate::git::GitBackend;
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Title written to a changelog that does not exist yet
pub const DEFAULT_TITLE: &str = "# Changelog";

/// Changelog subsection, declared in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Features,
    BugFixes,
    Documentation,
    OtherChanges,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Features,
        Category::BugFixes,
        Category::Documentation,
        Category::OtherChanges,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Features => "Features",
            Category::BugFixes => "Bug Fixes",
            Category::Documentation => "Documentation",
            Category::OtherChanges => "Other Changes",
        }
    }

    /// Category for a conventional commit type
    pub fn from_type(commit_type: &str) -> Self {
        match commit_type {
            "feat" => Category::Features,
            "fix" => Category::BugFixes,
            "docs" => Category::Documentation,
            _ => Category::OtherChanges,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Entries grouped by category, iterated in canonical order
pub type Categorized = BTreeMap<Category, Vec<String>>;

/// Classify a raw commit message
///
/// Returns `None` when the subject is not `type(scope)?: description`.
pub fn classify(message: &str) -> Option<(Category, String)> {
    let commit = ParsedCommit::parse(message)?;
    let text = match &commit.scope {
        Some(scope) => format!("**{}:** {}", scope, commit.description),
        None => commit.description.clone(),
    };
    Some((Category::from_type(&commit.r#type), text))
}

/// Classify every message, keeping input order within each category
pub fn categorize<I, S>(messages: I) -> Categorized
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut categorized = Categorized::new();
    for message in messages {
        let message = message.as_ref();
        match classify(message) {
            Some((category, text)) => categorized.entry(category).or_default().push(text),
            None => {
                let subject = message.lines().next().unwrap_or_default();
                debug!(subject, "Dropping unconventional commit");
            }
        }
    }
    categorized
}

/// Render a `## [version] - date` section
///
/// Empty categories are omitted. The result ends with a single newline.
pub fn render(version: &str, date: &str, categorized: &Categorized) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## [{}] - {}", version, date);

    for (category, entries) in categorized {
        if entries.is_empty() {
            continue;
        }
        let _ = write!(output, "\n### {}\n", category.title());
        for entry in entries {
            let _ = writeln!(output, "- {}", entry);
        }
    }

    output
}

/// Insert `section` directly after the title line of `existing`
///
/// Without a `# ` title the section is prepended as-is.
pub fn merge(existing: &str, section: &str) -> String {
    let section = section.trim_end();

    if existing.trim().is_empty() {
        return format!("{}\n", section);
    }

    let (first, rest) = match existing.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (existing, ""),
    };

    if !first.starts_with("# ") {
        return format!("{}\n\n{}", section, existing);
    }

    let rest = rest.trim_start_matches(['\n', '\r']);
    if rest.is_empty() {
        format!("{}\n\n{}\n", first, section)
    } else {
        format!("{}\n\n{}\n\n{}", first, section, rest)
    }
}

/// Merge `section` into the changelog at `path`, creating it when missing
pub fn update_file(path: &Path, section: &str) -> Result<()> {
    let existing = if path.exists() {
        fs::read_to_string(path).map_err(|e| RelmError::io(path, e))?
    } else {
        format!("{}\n", DEFAULT_TITLE)
    };

    let updated = merge(&existing, section);
    fs::write(path, updated).map_err(|e| RelmError::io(path, e))?;
    debug!(path = %path.display(), "Updated changelog");
    Ok(())
}

/// A rendered-to-be changelog section and the history it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogSection {
    pub version: String,
    pub date: NaiveDate,
    pub entries: Categorized,
    pub commit_count: usize,
    pub since_tag: Option<String>,
}

impl ChangelogSection {
    pub fn render(&self) -> String {
        render(
            &self.version,
            &self.date.format("%Y-%m-%d").to_string(),
            &self.entries,
        )
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

/// Builds changelog sections from the commit history of a project
pub struct ChangelogGenerator<'a, G: GitBackend> {
    git: &'a G,
    tag_prefix: String,
    date: NaiveDate,
}

impl<'a, G: GitBackend> ChangelogGenerator<'a, G> {
    /// Generator dated today, finding the last release by `tag_prefix`
    pub fn new(git: &'a G, tag_prefix: impl Into<String>) -> Self {
        ChangelogGenerator {
            git,
            tag_prefix: tag_prefix.into(),
            date: Local::now().date_naive(),
        }
    }

    /// Override the release date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Collect commits since the last release tag and classify them
    pub fn generate(&self, project_path: &Path, version: &str) -> Result<ChangelogSection> {
        let since_tag = self.git.latest_tag(project_path, &self.tag_prefix)?;
        let messages = self.git.commit_log(project_path, since_tag.as_deref())?;

        Ok(ChangelogSection {
            version: version.to_string(),
            date: self.date,
            entries: categorize(&messages),
            commit_count: messages.len(),
            since_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_plain() {
        assert_eq!(
            classify("feat: add x"),
            Some((Category::Features, "add x".to_string()))
        );
        assert_eq!(
            classify("fix: z"),
            Some((Category::BugFixes, "z".to_string()))
        );
    }

    #[test]
    fn test_classify_scoped() {
        assert_eq!(
            classify("feat(core): add y"),
            Some((Category::Features, "**core:** add y".to_string()))
        );
    }

    #[test]
    fn test_classify_other_types() {
        assert_eq!(
            classify("chore: bump deps").map(|(c, _)| c),
            Some(Category::OtherChanges)
        );
        assert_eq!(
            classify("docs: readme").map(|(c, _)| c),
            Some(Category::Documentation)
        );
    }

    #[test]
    fn test_classify_rejects_unconventional() {
        assert_eq!(classify("Merge branch 'main'"), None);
        assert_eq!(classify("feat:"), None);
    }

    #[test]
    fn test_render_skips_empty_categories() {
        let mut categorized = Categorized::new();
        categorized.insert(Category::Documentation, Vec::new());
        categorized.insert(Category::BugFixes, vec!["b".to_string()]);

        let section = render("1.0.1", "2024-01-02", &categorized);
        assert_eq!(section, "## [1.0.1] - 2024-01-02\n\n### Bug Fixes\n- b\n");
    }

    #[test]
    fn test_merge_without_title_prepends() {
        let merged = merge("## [1.0.0] - 2023-01-01\n- a\n", "## [1.1.0] - 2023-02-01\n");
        assert_eq!(
            merged,
            "## [1.1.0] - 2023-02-01\n\n## [1.0.0] - 2023-01-01\n- a\n"
        );
    }

    #[test]
    fn test_merge_title_only() {
        let merged = merge("# Changelog\n", "## [0.1.1] - 2023-01-01\n");
        assert_eq!(merged, "# Changelog\n\n## [0.1.1] - 2023-01-01\n");
    }
}
