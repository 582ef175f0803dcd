//! # Configuration
//!
//! Markz configuration is loaded with [`confique`], layering TOML files and
//! environment variables over compiled defaults.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `MARKZ_SETTINGS_DIR`, `MARKZ_NAMESPACE`,
//!    `MARKZ_UNAVAILABLE_LABEL`.
//! 2. **Project Config**: `<root>/.markz/markz.toml`. Its location does not
//!    follow `settings_dir`, since that is one of the values it can set.
//! 3. **Global Config**: `markz.toml` in the OS config directory (via the
//!    `directories` crate), or the file named by `MARKZ_GLOBAL_CONFIG`.
//! 4. **Compiled Defaults**: via `#[config(default = ...)]`.
//!
//! Missing files are skipped.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `settings_dir` | `.markz` | Directory under the workspace root holding markz data |
//! | `namespace` | `bookmarks` | Subdirectory of `settings_dir` holding `bookmarks.json` |
//! | `unavailable_label` | `(unavailable)` | Label text for bookmarks whose file can't be read |

use crate::error::{MarkzError, Result};
use crate::store::fs_backend::{DEFAULT_NAMESPACE, DEFAULT_SETTINGS_DIR};
use crate::store::DEFAULT_UNAVAILABLE_LABEL;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "markz.toml";
pub const GLOBAL_CONFIG_ENV: &str = "MARKZ_GLOBAL_CONFIG";

/// Configuration for markz, stored in `markz.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MarkzConfig {
    /// Directory under the workspace root where markz keeps its data.
    #[config(env = "MARKZ_SETTINGS_DIR", default = ".markz")]
    pub settings_dir: String,

    /// Subdirectory of `settings_dir` holding the bookmarks document.
    #[config(env = "MARKZ_NAMESPACE", default = "bookmarks")]
    pub namespace: String,

    /// Shown in place of line text when a bookmarked file cannot be read.
    #[config(env = "MARKZ_UNAVAILABLE_LABEL", default = "(unavailable)")]
    pub unavailable_label: String,
}

impl Default for MarkzConfig {
    fn default() -> Self {
        Self {
            settings_dir: DEFAULT_SETTINGS_DIR.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            unavailable_label: DEFAULT_UNAVAILABLE_LABEL.to_string(),
        }
    }
}

impl MarkzConfig {
    /// Loads the layered configuration for the workspace at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        Self::load_from(&project_config_path(root), global_config_path().as_deref())
    }

    pub fn load_from(project: &Path, global: Option<&Path>) -> Result<Self> {
        let mut builder = MarkzConfig::builder().env().file(project);
        if let Some(global) = global {
            builder = builder.file(global);
        }
        let config = builder
            .load()
            .map_err(|e| MarkzError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Both directory settings must be a single plain path segment.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("settings_dir", &self.settings_dir),
            ("namespace", &self.namespace),
        ] {
            let plain = !value.is_empty()
                && value != "."
                && value != ".."
                && !value.contains(['/', '\\']);
            if !plain {
                return Err(MarkzError::Config(format!(
                    "{} must be a single directory name, got '{}'",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(DEFAULT_SETTINGS_DIR).join(CONFIG_FILE_NAME)
}

pub fn global_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(GLOBAL_CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    ProjectDirs::from("com", "markz", "markz")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
