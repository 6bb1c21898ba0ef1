use regex::Regex;
use std::sync::OnceLock;

fn conventional_subject() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)(?:\(([^)]+)\))?!?:\s*(.*)$").ok())
        .as_ref()
}

/// Parsed representation of a conventional commit subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
}

impl ParsedCommit {
    /// Parse the subject line of a commit message
    ///
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    ///
    /// The `!` marker is accepted and discarded. Returns `None` for anything
    /// else, including an empty description.
    pub fn parse(message: &str) -> Option<Self> {
        let subject = message.lines().next()?.trim();
        let captures = conventional_subject()?.captures(subject)?;

        let r#type = captures.get(1)?.as_str().to_lowercase();
        let scope = captures
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .filter(|s| !s.is_empty());
        let description = captures.get(3)?.as_str().trim().to_string();

        if description.is_empty() {
            return None;
        }

        Some(ParsedCommit {
            r#type,
            scope,
            description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_scope() {
        let commit = ParsedCommit::parse("feat(auth): add login").unwrap();
        assert_eq!(commit.r#type, "feat");
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert_eq!(commit.description, "add login");
    }

    #[test]
    fn test_parse_with_breaking_marker() {
        let commit = ParsedCommit::parse("feat(auth)!: redesign login").unwrap();
        assert_eq!(commit.r#type, "feat");
        assert_eq!(commit.scope, Some("auth".to_string()));
        assert_eq!(commit.description, "redesign login");
    }

    #[test]
    fn test_parse_breaking_without_scope() {
        let commit = ParsedCommit::parse("feat!: redesign").unwrap();
        assert_eq!(commit.scope, None);
        assert_eq!(commit.description, "redesign");
    }

    #[test]
    fn test_parse_uses_subject_line_only() {
        let commit = ParsedCommit::parse("fix: something\n\nBREAKING CHANGE: desc").unwrap();
        assert_eq!(commit.description, "something");
        assert_eq!(commit.r#type, "fix");
    }

    #[test]
    fn test_parse_non_conventional() {
        assert!(ParsedCommit::parse("Random commit message").is_none());
        assert!(ParsedCommit::parse("Merge branch 'main': sync").is_none());
        assert!(ParsedCommit::parse("").is_none());
    }

    #[test]
    fn test_parse_empty_description() {
        assert!(ParsedCommit::parse("feat:   ").is_none());
    }

    #[test]
    fn test_parse_normalizes_type_case() {
        let commit = ParsedCommit::parse("Fix: crash on start").unwrap();
        assert_eq!(commit.r#type, "fix");
    }
}
