//! `AppConfig` struct, TOML read/write, and the on-disk location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File name of the on-disk configuration.
const CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB provider settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB provider configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API key. The `TMDB_API_KEY` environment variable takes
    /// precedence over this value.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL override (trailing slash required). Defaults to the
    /// public TMDB API v3 endpoint when unset.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

/// Picks the location of the configuration file.
///
/// An explicit directory (the `--dir` flag) always wins and is used as
/// given. Without one the file lives per user, at
/// `~/.config/tvscope/config.toml`.
///
/// # Errors
///
/// Returns an error when no directory is given and `HOME` is unset or
/// blank, leaving no way to derive the per-user location.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir.join(CONFIG_FILE)),
        None => {
            let home = std::env::var_os("HOME")
                .filter(|home| !home.is_empty())
                .context("HOME environment variable is not set")?;
            Ok(PathBuf::from(home)
                .join(".config")
                .join("tvscope")
                .join(CONFIG_FILE))
        }
    }
}
