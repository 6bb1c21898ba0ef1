use relm::discovery::{find_projects, load_project, select_targets, ReleaseMode};
use relm::RelmError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_manifest(dir: &Path, body: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("pyproject.toml"), body).unwrap();
}

fn project_manifest(name: &str, version: &str) -> String {
    format!("[project]\nname = \"{}\"\nversion = \"{}\"\n", name, version)
}

#[test]
fn test_load_project_reads_metadata() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        "[project]\nname = \"core\"\nversion = \"1.0.0\"\ndescription = \"Core library\"\n",
    );

    let project = load_project(dir.path()).unwrap().unwrap();
    assert_eq!(project.name, "core");
    assert_eq!(project.version, "1.0.0");
    assert_eq!(project.description.as_deref(), Some("Core library"));
    assert_eq!(project.path, dir.path());
}

#[test]
fn test_load_project_requires_name_and_version() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[project]\nname = \"core\"\n");
    assert_eq!(load_project(dir.path()).unwrap(), None);

    write_manifest(dir.path(), "[tool.black]\nline-length = 88\n");
    assert_eq!(load_project(dir.path()).unwrap(), None);
}

#[test]
fn test_load_project_ignores_broken_manifest() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[project\nname = ");
    assert_eq!(load_project(dir.path()).unwrap(), None);
}

#[test]
fn test_find_projects_scans_root_and_children_sorted() {
    let root = TempDir::new().unwrap();
    write_manifest(root.path(), &project_manifest("workspace", "0.1.0"));
    write_manifest(&root.path().join("zeta"), &project_manifest("zeta", "2.0.0"));
    write_manifest(&root.path().join("alpha"), &project_manifest("alpha", "1.0.0"));
    write_manifest(&root.path().join(".hidden"), &project_manifest("hidden", "1.0.0"));
    write_manifest(
        &root.path().join("alpha/nested"),
        &project_manifest("nested", "1.0.0"),
    );
    fs::create_dir_all(root.path().join("docs")).unwrap();

    let names: Vec<String> = find_projects(root.path())
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();

    assert_eq!(names, vec!["alpha", "workspace", "zeta"]);
}

#[test]
fn test_select_targets_against_discovered_projects() {
    let root = TempDir::new().unwrap();
    write_manifest(&root.path().join("api"), &project_manifest("api", "1.0.0"));
    write_manifest(&root.path().join("core"), &project_manifest("core", "0.3.0"));
    let projects = find_projects(root.path()).unwrap();

    let (targets, mode) = select_targets(projects.clone(), "all", root.path()).unwrap();
    assert_eq!(targets.len(), 2);
    assert_eq!(mode, ReleaseMode::Batch);

    let (targets, mode) = select_targets(projects.clone(), "core", root.path()).unwrap();
    assert_eq!(targets[0].version, "0.3.0");
    assert_eq!(mode, ReleaseMode::Single);

    let err = select_targets(projects, "web", root.path()).unwrap_err();
    assert!(matches!(err, RelmError::ProjectNotFound { .. }));
    assert!(err.to_string().contains("'web'"));
}
