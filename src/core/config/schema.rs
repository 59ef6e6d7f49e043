//! core::config::schema
//!
//! Configuration file schema.
//!
//! # Validation
//!
//! Values are validated after parsing: `api_base` must be an absolute
//! http(s) URL and strings may not be blank.

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Contents of `config.toml`.
///
/// # Example
///
/// ```toml
/// api_base = "https://github.example.com/api/v3"
/// token = "ghp_xxx"
/// user_agent = "release-bot"
/// ```
#[derive(Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// API root (default: `https://api.github.com`)
    pub api_base: Option<String>,

    /// Access token; environment variables take precedence
    pub token: Option<String>,

    /// User-Agent header value
    pub user_agent: Option<String>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for FileConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileConfig")
            .field("api_base", &self.api_base)
            .field("has_token", &self.token.is_some())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(api_base) = &self.api_base {
            let parsed = url::Url::parse(api_base).map_err(|e| {
                ConfigError::InvalidValue(format!("invalid api_base '{}': {}", api_base, e))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid api_base '{}', must be an http or https URL",
                    api_base
                )));
            }
        }

        if matches!(&self.token, Some(t) if t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue("token cannot be empty".into()));
        }

        if matches!(&self.user_agent, Some(ua) if ua.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "user_agent cannot be empty".into(),
            ));
        }

        Ok(())
    }
}
