//! Configuration management for shelf.
//!
//! Loads configuration from ${SHELF_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file contents written by `shelf config init`.
fn default_config_template() -> &'static str {
    "\
# shelf configuration

# Base URL of the shelf server.
base_url = \"http://localhost:8000\"

# Email prefilled in the login form.
# email = \"you@example.com\"
"
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the shelf server.
    pub base_url: String,

    /// Email prefilled in the login form (optional).
    pub email: Option<String>,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// Loads configuration from the default config path.
    ///
    /// The `SHELF_BASE_URL` environment variable overrides the configured
    /// base URL when set and non-empty.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var("SHELF_BASE_URL")
            && !url.trim().is_empty()
        {
            config.base_url = url;
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            email: None,
        }
    }
}

pub mod paths {
    //! Path resolution for shelf configuration and data directories.
    //!
    //! SHELF_HOME resolution order:
    //! 1. SHELF_HOME environment variable (if set)
    //! 2. ~/.config/shelf (default)

    use std::path::PathBuf;

    /// Returns the shelf home directory.
    ///
    /// Checks SHELF_HOME env var first, falls back to ~/.config/shelf
    pub fn shelf_home() -> PathBuf {
        if let Ok(home) = std::env::var("SHELF_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("shelf"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        shelf_home().join("config.toml")
    }

    /// Returns the path to the credentials file.
    pub fn credentials_path() -> PathBuf {
        shelf_home().join("credentials.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        shelf_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.email, None);
    }

    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "email = \"demo@demo.com\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.email.as_deref(), Some("demo@demo.com"));
    }

    #[test]
    fn test_init_writes_template_once() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::init(&config_path).unwrap();
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "http://localhost:8000");

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "base_url = [not toml").unwrap();
        assert!(Config::load_from(&config_path).is_err());
    }
}
