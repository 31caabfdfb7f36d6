//! Error types and exit codes for vaultlens.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 6;
}

/// Main error type for vaultlens operations.
///
/// The analytics engine itself never fails; these errors come from scanning
/// the vault, loading configuration and printing results.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("No vault given: pass --vault or set default_vault in the config file")]
    NoVaultConfigured,

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),
}

impl VaultError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::VaultNotFound(_) | VaultError::NoVaultConfigured => {
                exit_code::VAULT_NOT_FOUND
            }
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for vaultlens operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(VaultError::VaultNotFound(PathBuf::from("x")).exit_code(), 6);
        assert_eq!(VaultError::NoVaultConfigured.exit_code(), 6);
        assert_eq!(VaultError::ConfigError("bad".into()).exit_code(), 1);
        let invalid = VaultError::InvalidFrontmatter {
            path: PathBuf::from("a.md"),
            message: "bad".into(),
        };
        assert_eq!(invalid.exit_code(), 1);
        assert_eq!(ExitCode::Success.code(), 0);
    }
}
