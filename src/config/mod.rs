//! Configuration for backlog-cli.
//!
//! Connection details come from the process environment and are read once per
//! invocation into an explicit [`Config`] value.

use thiserror::Error;

/// Environment variable holding the Backlog space domain.
pub const DOMAIN_VAR: &str = "BACKLOG_DOMAIN";

/// Environment variable holding the Backlog API key.
pub const API_KEY_VAR: &str = "BACKLOG_API_KEY";

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    /// A value is present but unusable.
    #[error("invalid {var}: {reason}")]
    ValidationError { var: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Connection settings for one invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// The Backlog space domain, e.g. `mycompany.backlog.com`.
    pub domain: String,

    /// The API key issued in the Backlog personal settings.
    pub api_key: String,
}

impl Config {
    /// Create a new configuration.
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            api_key: api_key.into(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Values are trimmed; an empty value counts as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingVar(name))
        };

        let config = Self::new(read(DOMAIN_VAR)?, read(API_KEY_VAR)?);
        config.validate()?;
        Ok(config)
    }

    /// Validate this configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` when the domain or key contains whitespace.
    pub fn validate(&self) -> Result<()> {
        if self.domain.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError {
                var: DOMAIN_VAR,
                reason: format!("'{}' cannot contain whitespace", self.domain),
            });
        }

        if self.api_key.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError {
                var: API_KEY_VAR,
                reason: "API key cannot contain whitespace".to_string(),
            });
        }

        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &"****")
            .finish()
    }
}
