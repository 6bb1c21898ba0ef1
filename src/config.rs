use crate::domain::{BumpKind, TagPattern};
use crate::error::{RelmError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file name looked up in the root directory
pub const CONFIG_FILE: &str = "relm.toml";

/// Represents the complete configuration for relm.
///
/// Contains release behavior and the file layout conventions of each project.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub files: FilesConfig,
}

fn default_true() -> bool {
    true
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_commit_message() -> String {
    "release: {name} v{version}".to_string()
}

/// Release behavior defaults; CLI flags take precedence.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default = "default_true")]
    pub check_dirty: bool,

    #[serde(default)]
    pub auto_confirm: bool,

    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            fail_fast: false,
            check_dirty: true,
            auto_confirm: false,
            tag_pattern: default_tag_pattern(),
            commit_message: default_commit_message(),
        }
    }
}

fn default_changelog() -> PathBuf {
    PathBuf::from("CHANGELOG.md")
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("tests")
}

/// Project-relative locations of the files a release rewrites.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilesConfig {
    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,

    /// Extra files holding a `__version__` constant
    #[serde(default)]
    pub version_files: Vec<PathBuf>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            changelog: default_changelog(),
            tests_dir: default_tests_dir(),
            version_files: Vec::new(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relm.toml` in the root directory
/// 3. `relm/relm.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if root.join(CONFIG_FILE).exists() {
        root.join(CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("relm").join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }
        path
    } else {
        return Ok(Config::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| RelmError::io(&path, e))?;
    toml::from_str(&config_str)
        .map_err(|e| RelmError::config(format!("{}: {}", path.display(), e)))
}

/// Command-line overrides for release behavior
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleaseOverrides {
    pub yes: bool,
    pub fail_fast: bool,
    pub no_check_dirty: bool,
    pub dry_run: bool,
}

/// Validated settings for one release invocation
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOptions {
    pub bump: BumpKind,
    pub auto_confirm: bool,
    pub fail_fast: bool,
    pub check_dirty: bool,
    pub dry_run: bool,
    pub tag_pattern: TagPattern,
    pub commit_message: String,
    pub files: FilesConfig,
}

impl ReleaseOptions {
    /// Merge file configuration with CLI overrides and validate the result
    pub fn resolve(config: &Config, bump: BumpKind, overrides: &ReleaseOverrides) -> Result<Self> {
        let tag_pattern = TagPattern::new(config.release.tag_pattern.clone())?;

        if !config.release.commit_message.contains("{version}") {
            return Err(RelmError::config(format!(
                "Commit message '{}' must contain a {{version}} placeholder",
                config.release.commit_message
            )));
        }

        if config.files.changelog.as_os_str().is_empty() {
            return Err(RelmError::config("Changelog path must not be empty"));
        }

        Ok(ReleaseOptions {
            bump,
            auto_confirm: overrides.yes || config.release.auto_confirm,
            fail_fast: overrides.fail_fast || config.release.fail_fast,
            check_dirty: config.release.check_dirty && !overrides.no_check_dirty,
            dry_run: overrides.dry_run,
            tag_pattern,
            commit_message: config.release.commit_message.clone(),
            files: config.files.clone(),
        })
    }

    /// Render the release commit message for a project
    pub fn commit_message_for(&self, name: &str, version: &str) -> String {
        self.commit_message
            .replace("{name}", name)
            .replace("{version}", version)
    }
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        ReleaseOptions {
            bump: BumpKind::Patch,
            auto_confirm: true,
            fail_fast: false,
            check_dirty: true,
            dry_run: false,
            tag_pattern: TagPattern::default(),
            commit_message: default_commit_message(),
            files: FilesConfig::default(),
        }
    }
}
