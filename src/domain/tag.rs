use crate::error::{RelmError, Result};

/// Tag naming pattern (e.g., "v{version}", "{name}-v{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

impl TagPattern {
    /// Create a tag pattern, rejecting patterns without a `{version}` placeholder
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.matches("{version}").count() != 1 {
            return Err(RelmError::config(format!(
                "Tag pattern '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }
        Ok(TagPattern { pattern })
    }

    /// Format a tag for a project release
    /// Example: pattern="{name}-v{version}", name="core", version="1.2.3" -> "core-v1.2.3"
    pub fn format(&self, name: &str, version: &str) -> String {
        self.pattern
            .replace("{name}", name)
            .replace("{version}", version)
    }

    /// Literal text preceding the version for a given project
    ///
    /// Used to find the previous release tag of that project.
    pub fn prefix(&self, name: &str) -> String {
        let before = self
            .pattern
            .split("{version}")
            .next()
            .unwrap_or_default();
        before.replace("{name}", name)
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern {
            pattern: "v{version}".to_string(),
        }
    }
}
