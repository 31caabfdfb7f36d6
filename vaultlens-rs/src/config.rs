//! User configuration (`~/.config/vaultlens/config.toml`).
//!
//! Every field is optional; command-line flags take precedence.

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "vaultlens";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "VAULTLENS_CONFIG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault used when `--vault` is not given.
    pub default_vault: Option<PathBuf>,
    pub inbox: InboxConfig,
    pub trends: TrendsConfig,
    pub quality: QualityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InboxConfig {
    pub headings: Vec<String>,
    pub min_items: usize,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            headings: vec!["INBOX".to_string()],
            min_items: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendsConfig {
    pub timespan: String,
    pub granularity: String,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            timespan: "1y".to_string(),
            granularity: "month".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Number of lowest-scoring notes listed by `quality`.
    pub limit: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

impl Config {
    /// Location of the config file. `VAULTLENS_CONFIG_DIR` overrides the
    /// platform config directory.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    VaultError::ConfigError("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the user config, or the defaults when there is none.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load a config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            VaultError::ConfigError(format!(
                "failed to read config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = toml::from_str(&content).map_err(|e| {
            VaultError::ConfigError(format!(
                "failed to parse config from {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Pick the vault to open: the command-line path, else the configured default.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        cli_vault
            .map(Path::to_path_buf)
            .or_else(|| self.default_vault.clone())
            .ok_or(VaultError::NoVaultConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_vault, None);
        assert_eq!(config.inbox.headings, vec!["INBOX"]);
        assert_eq!(config.inbox.min_items, 1);
        assert_eq!(config.trends.timespan, "1y");
        assert_eq!(config.trends.granularity, "month");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "default_vault = \"/notes\"\n\n[inbox]\nheadings = [\"Inbox\", \"Capture\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_vault, Some(PathBuf::from("/notes")));
        assert_eq!(config.inbox.headings, vec!["Inbox", "Capture"]);
        assert_eq!(config.inbox.min_items, 1);
        assert_eq!(config.quality.limit, 20);
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_vault = [").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(VaultError::ConfigError(_))));
    }

    #[test]
    fn test_resolve_vault_path() {
        let config = Config {
            default_vault: Some(PathBuf::from("/default")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_vault_path(Some(Path::new("/cli"))).unwrap(),
            PathBuf::from("/cli")
        );
        assert_eq!(config.resolve_vault_path(None).unwrap(), PathBuf::from("/default"));

        let result = Config::default().resolve_vault_path(None);
        assert!(matches!(result, Err(VaultError::NoVaultConfigured)));
    }
}
