//! core::config
//!
//! Configuration loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`FORGEGIT_TOKEN`, then `GITHUB_TOKEN`; token only)
//! 4. CLI flags (applied by the caller through the `with_*` methods)
//!
//! # Config File Locations
//!
//! Searched in order, first match wins:
//! 1. `$FORGEGIT_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forgegit/config.toml`
//! 3. `~/.forgegit/config.toml`
//!
//! A missing file is not an error.
//!
//! # Example
//!
//! ```no_run
//! use forgegit::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("API: {}", config.api_base());
//! println!("Authenticated: {}", config.token().is_some());
//! ```

pub mod schema;

pub use schema::FileConfig;

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default User-Agent header value.
pub const DEFAULT_USER_AGENT: &str = "forgegit";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FORGEGIT_CONFIG";

/// Environment variables consulted for a token, in order.
pub const TOKEN_ENVS: [&str; 2] = ["FORGEGIT_TOKEN", "GITHUB_TOKEN"];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Resolved configuration.
#[derive(Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub file: FileConfig,
    /// Token from the environment, if any
    env_token: Option<String>,
    /// Path the file values came from
    path: Option<PathBuf>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("file", &self.file)
            .field("has_env_token", &self.env_token.is_some())
            .field("path", &self.path)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment and default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok(), dirs::home_dir())
    }

    /// Load configuration with an explicit environment and home directory.
    pub fn load_with<F>(env: F, home: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (file, path) = match Self::find_config_file(&env, home) {
            Some(path) => (Self::read_config(&path)?, Some(path)),
            None => (FileConfig::default(), None),
        };
        file.validate()?;
        let env_token = Self::env_token(&env);

        debug!(
            path = ?path,
            env_token = env_token.is_some(),
            "loaded configuration"
        );

        Ok(Config {
            file,
            env_token,
            path,
        })
    }

    /// Load a specific config file, ignoring the search path.
    ///
    /// Token environment variables still apply.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let file = Self::read_config(path)?;
        file.validate()?;
        Ok(Config {
            file,
            env_token: Self::env_token(&|key: &str| std::env::var(key).ok()),
            path: Some(path.to_path_buf()),
        })
    }

    /// First non-blank token from `TOKEN_ENVS`.
    fn env_token<F>(env: &F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        TOKEN_ENVS
            .iter()
            .filter_map(|key| env(*key))
            .find(|t| !t.trim().is_empty())
    }

    /// Locate the first existing config file.
    fn find_config_file<F>(env: &F, home: Option<PathBuf>) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Check $FORGEGIT_CONFIG
        if let Some(path) = env(CONFIG_ENV).map(PathBuf::from) {
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/forgegit/config.toml
        if let Some(xdg_home) = env("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("forgegit/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.forgegit/config.toml
        let path = home?.join(".forgegit/config.toml");
        path.exists().then_some(path)
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Override the API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the URL is not http(s).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Result<Self, ConfigError> {
        self.file.api_base = Some(api_base.into());
        self.file.validate()?;
        Ok(self)
    }

    /// Override the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.env_token = Some(token.into());
        self
    }

    /// API root URL.
    pub fn api_base(&self) -> &str {
        self.file.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Access token; the environment wins over the file.
    pub fn token(&self) -> Option<&str> {
        self.env_token.as_deref().or(self.file.token.as_deref())
    }

    /// User-Agent header value.
    pub fn user_agent(&self) -> &str {
        self.file.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Path the config file was loaded from, if any.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn load_empty_defaults() {
        let home = TempDir::new().unwrap();
        let config = Config::load_with(env_of(&[]), Some(home.path().to_path_buf())).unwrap();

        assert_eq!(config.api_base(), "https://api.github.com");
        assert_eq!(config.user_agent(), "forgegit");
        assert!(config.token().is_none());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_explicit_env_path() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("custom.toml");
        fs::write(&config_path, "token = \"from_file\"\n").unwrap();

        let config = Config::load_with(
            env_of(&[(CONFIG_ENV, config_path.to_str().unwrap())]),
            None,
        )
        .unwrap();

        assert_eq!(config.token(), Some("from_file"));
        assert_eq!(config.loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn load_from_xdg() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("forgegit");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "api_base = \"https://github.example.com/api/v3\"\n",
        )
        .unwrap();

        let config = Config::load_with(
            env_of(&[("XDG_CONFIG_HOME", temp.path().to_str().unwrap())]),
            None,
        )
        .unwrap();

        assert_eq!(config.api_base(), "https://github.example.com/api/v3");
    }

    #[test]
    fn load_from_home() {
        let home = TempDir::new().unwrap();
        let dir = home.path().join(".forgegit");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "user_agent = \"bot\"\n").unwrap();

        let config = Config::load_with(env_of(&[]), Some(home.path().to_path_buf())).unwrap();
        assert_eq!(config.user_agent(), "bot");
    }

    #[test]
    fn env_token_overrides_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "token = \"from_file\"\n").unwrap();

        let config = Config::load_with(
            env_of(&[
                (CONFIG_ENV, config_path.to_str().unwrap()),
                ("GITHUB_TOKEN", "from_github_env"),
            ]),
            None,
        )
        .unwrap();
        assert_eq!(config.token(), Some("from_github_env"));
    }

    #[test]
    fn forgegit_token_preferred_over_github_token() {
        let config = Config::load_with(
            env_of(&[("FORGEGIT_TOKEN", "primary"), ("GITHUB_TOKEN", "secondary")]),
            None,
        )
        .unwrap();
        assert_eq!(config.token(), Some("primary"));
    }

    #[test]
    fn blank_env_token_ignored() {
        let config = Config::load_with(
            env_of(&[("FORGEGIT_TOKEN", ""), ("GITHUB_TOKEN", "secondary")]),
            None,
        )
        .unwrap();
        assert_eq!(config.token(), Some("secondary"));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "unknown_field = true\n").unwrap();

        let result = Config::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn invalid_api_base_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "api_base = \"not a url\"\n").unwrap();

        let result = Config::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn missing_explicit_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn overrides() {
        let config = Config::default()
            .with_api_base("http://localhost:8080")
            .unwrap()
            .with_token("cli_token");
        assert_eq!(config.api_base(), "http://localhost:8080");
        assert_eq!(config.token(), Some("cli_token"));

        assert!(Config::default().with_api_base("localhost").is_err());
    }
}
