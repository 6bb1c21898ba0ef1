use relm::boundary::BoundaryWarning;
use relm::ui;
use std::path::PathBuf;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        latest_tag: Some("v1.0.0".to_string()),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v1.0.0"),
        "Message should contain tag 'v1.0.0', got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_manifest_unchanged_display() {
    let warning = BoundaryWarning::ManifestUnchanged {
        path: PathBuf::from("core/pyproject.toml"),
        version: "1.0.0".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(display_msg.contains("\"1.0.0\""));
    assert!(display_msg.contains("core/pyproject.toml"));
    assert!(display_msg.contains("unchanged"));
}

#[test]
fn test_boundary_warning_changelog_failed_display() {
    let warning = BoundaryWarning::ChangelogFailed {
        path: PathBuf::from("core/CHANGELOG.md"),
        reason: "read-only file system".to_string(),
    };

    assert_eq!(
        warning.to_string(),
        "Could not update changelog core/CHANGELOG.md: read-only file system"
    );
}

#[test]
fn test_boundary_warning_is_cloneable_and_comparable() {
    let warning = BoundaryWarning::PatchFailed {
        path: PathBuf::from("src/core/__init__.py"),
        reason: "denied".to_string(),
    };
    assert_eq!(warning.clone(), warning);
}

// ============================================================================
// UI Display Function Tests
// ============================================================================

#[test]
fn test_display_boundary_warning_does_not_panic() {
    let warnings = vec![
        BoundaryWarning::NoNewCommits { latest_tag: None },
        BoundaryWarning::PatchFailed {
            path: PathBuf::from("tests"),
            reason: "denied".to_string(),
        },
    ];

    for warning in &warnings {
        ui::display_boundary_warning(warning);
    }
}
