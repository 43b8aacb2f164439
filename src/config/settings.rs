//! User configuration file
//!
//! Optional defaults stored in `<config dir>/files-to-prompt/config.toml`:
//!
//! ```toml
//! [defaults]
//! include_hidden = false
//! ignore_gitignore = false
//! ignore = ["*.lock", "*.min.js"]
//! ignore_files = ["~/prompt-ignore.txt"]
//! ```

use crate::core::error::{PromptError, Result};
use directories::{ProjectDirs, UserDirs};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub defaults: Defaults,
}

/// Defaults merged under the command-line options
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Defaults {
    pub include_hidden: bool,
    pub ignore_gitignore: bool,
    /// File name globs, applied before any `--ignore`
    pub ignore: Vec<String>,
    /// Extra ignore files, resolved relative to the config file
    pub ignore_files: Vec<PathBuf>,
}

impl ConfigFile {
    /// Default location of the configuration file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "files-to-prompt")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: ConfigFile =
            toml::from_str(&content).map_err(|e| {
                PromptError::configuration(format!("Failed to parse {}: {}", path.display(), e))
            })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.defaults.ignore_files = config
            .defaults
            .ignore_files
            .iter()
            .map(|file| resolve_path(file, base))
            .collect();

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}

/// Expand a leading `~` and anchor relative paths at `base`
fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(user_dirs) = UserDirs::new() {
            return user_dirs.home_dir().join(rest);
        }
    }

    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
