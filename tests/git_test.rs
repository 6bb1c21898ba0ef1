use git2::{Repository, RepositoryInitOptions};
use relm::git::{Git2Backend, GitBackend};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn init_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(dir.path(), &opts).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Relm Test").unwrap();
    config.set_str("user.email", "relm@example.com").unwrap();
    (dir, repo)
}

fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_unborn_branch_name_and_empty_history() {
    let (dir, _repo) = init_repo();
    let git = Git2Backend::new();

    assert_eq!(git.current_branch(dir.path()).unwrap(), "main");
    assert!(git.commit_log(dir.path(), None).unwrap().is_empty());
    assert_eq!(git.latest_tag(dir.path(), "v").unwrap(), None);
}

#[test]
fn test_commit_and_cleanliness_are_scoped_to_project() {
    let (dir, _repo) = init_repo();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    write(dir.path(), "a/pyproject.toml", "[project]\nname = \"a\"\nversion = \"1.0.0\"\n");
    write(dir.path(), "b/pyproject.toml", "[project]\nname = \"b\"\nversion = \"1.0.0\"\n");

    let git = Git2Backend::new();
    assert!(!git.is_clean(&a).unwrap());
    assert!(!git.is_clean(&b).unwrap());

    git.commit(&a, "feat: add a").unwrap();

    assert!(git.is_clean(&a).unwrap());
    assert!(!git.is_clean(&b).unwrap());
    assert_eq!(git.current_branch(&a).unwrap(), "main");
}

#[test]
fn test_current_branch_with_history() {
    let (dir, repo) = init_repo();
    let git = Git2Backend::new();

    write(dir.path(), "file.txt", "1");
    git.commit(dir.path(), "feat: first").unwrap();
    assert_eq!(git.current_branch(dir.path()).unwrap(), "main");

    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch("release", &head, false).unwrap();
    repo.set_head("refs/heads/release").unwrap();
    assert_eq!(git.current_branch(dir.path()).unwrap(), "release");

    repo.set_head_detached(head.id()).unwrap();
    assert_eq!(git.current_branch(dir.path()).unwrap(), "HEAD (detached)");
}

#[test]
fn test_commit_log_filters_by_path_and_tag() {
    let (dir, _repo) = init_repo();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    let git = Git2Backend::new();

    write(dir.path(), "a/one.txt", "1");
    git.commit(&a, "feat: one").unwrap();
    write(dir.path(), "b/other.txt", "1");
    git.commit(&b, "fix: unrelated").unwrap();
    git.tag(&a, "v0.1.0").unwrap();
    write(dir.path(), "a/two.txt", "2");
    git.commit(&a, "fix: two\n\nWith a body.").unwrap();
    write(dir.path(), "b/other.txt", "2");
    git.commit(&b, "chore: unrelated again").unwrap();

    assert_eq!(
        git.commit_log(&a, None).unwrap(),
        vec!["fix: two\n\nWith a body.", "feat: one"]
    );
    assert_eq!(git.commit_log(&a, Some("v0.1.0")).unwrap(), vec!["fix: two\n\nWith a body."]);
    assert_eq!(
        git.commit_log(dir.path(), Some("v0.1.0")).unwrap(),
        vec!["chore: unrelated again", "fix: two\n\nWith a body."]
    );
}

#[test]
fn test_latest_tag_respects_prefix_and_reachability() {
    let (dir, _repo) = init_repo();
    let git = Git2Backend::new();

    write(dir.path(), "file.txt", "1");
    git.commit(dir.path(), "feat: first").unwrap();
    git.tag(dir.path(), "v1.0.0").unwrap();
    git.tag(dir.path(), "core-v3.0.0").unwrap();

    write(dir.path(), "file.txt", "2");
    git.commit(dir.path(), "fix: second").unwrap();
    git.tag(dir.path(), "v1.0.1-rc.1").unwrap();
    git.tag(dir.path(), "v1.0.1").unwrap();

    assert_eq!(
        git.latest_tag(dir.path(), "v").unwrap(),
        Some("v1.0.1".to_string())
    );
    assert_eq!(
        git.latest_tag(dir.path(), "core-v").unwrap(),
        Some("core-v3.0.0".to_string())
    );
    assert_eq!(git.latest_tag(dir.path(), "api-v").unwrap(), None);
}

#[test]
fn test_tag_on_unborn_branch_fails() {
    let (dir, _repo) = init_repo();
    let git = Git2Backend::new();
    assert!(git.tag(dir.path(), "v0.1.0").is_err());
}

#[test]
fn test_operations_outside_repository_fail() {
    let dir = TempDir::new().unwrap();
    let git = Git2Backend::new();
    // Only meaningful when the temp directory itself is not inside a repository
    if Repository::discover(dir.path()).is_err() {
        assert!(git.is_clean(dir.path()).is_err());
    }
}

#[test]
fn test_commit_stages_deletions() {
    let (dir, repo) = init_repo();
    let git = Git2Backend::new();

    write(dir.path(), "old.txt", "gone soon");
    git.commit(dir.path(), "chore: add").unwrap();
    fs::remove_file(dir.path().join("old.txt")).unwrap();
    git.commit(dir.path(), "chore: remove").unwrap();

    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_name("old.txt").is_none());
    assert!(git.is_clean(dir.path()).unwrap());
}
