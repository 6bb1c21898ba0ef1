use std::fmt;
use std::path::PathBuf;

/// Non-fatal issues met while releasing a project.
/// The release still completes; these are reported to the operator.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No commits touched the project since its last release tag
    NoNewCommits { latest_tag: Option<String> },
    /// The manifest did not contain the expected version literal
    ManifestUnchanged { path: PathBuf, version: String },
    /// A version file could not be rewritten
    PatchFailed { path: PathBuf, reason: String },
    /// The changelog could not be read or written
    ChangelogFailed { path: PathBuf, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits { latest_tag } => match latest_tag {
                Some(tag) => write!(f, "No new commits since tag '{}'", tag),
                None => write!(f, "No commits found for this project"),
            },
            BoundaryWarning::ManifestUnchanged { path, version } => {
                write!(
                    f,
                    "Version \"{}\" not found in {}; manifest left unchanged",
                    version,
                    path.display()
                )
            }
            BoundaryWarning::PatchFailed { path, reason } => {
                write!(f, "Could not update {}: {}", path.display(), reason)
            }
            BoundaryWarning::ChangelogFailed { path, reason } => {
                write!(f, "Could not update changelog {}: {}", path.display(), reason)
            }
        }
    }
}
