use std::fmt;
use std::path::{Path, PathBuf};

/// Manifest file name that marks a directory as a project
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// A releasable project discovered under the root directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub version: String,
    pub path: PathBuf,
    pub description: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, version: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Project {
            name: name.into(),
            version: version.into(),
            path: path.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.path.join(MANIFEST_FILE)
    }

    /// Importable module name (`my-tool` -> `my_tool`)
    pub fn module_name(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Conventional locations of the `__version__` constant
    pub fn version_constant_paths(&self) -> Vec<PathBuf> {
        let module = self.module_name();
        vec![
            self.path.join("src").join(&module).join("__init__.py"),
            self.path.join(&module).join("__init__.py"),
        ]
    }

    /// Resolve a project-relative path
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (v{}) - {}", self.name, self.version, self.path.display())
    }
}
