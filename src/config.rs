//! Configuration management for the issue agent.
//!
//! Configuration is read from environment variables:
//! - `ANTHROPIC_API_KEY` - Required. API key for the Anthropic Messages API.
//! - `ANTHROPIC_MODEL` - Optional. Model identifier. Defaults to `claude-3-5-sonnet-20240620`.
//! - `MCP_SERVER_URL` - Optional. Base URL of the MCP server that executes
//!   repository operations. Defaults to `http://localhost:8080`.
//! - `MAX_STEPS` - Optional. Maximum provider round-trips per run. Defaults to `20`.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API key
    pub api_key: String,

    /// Model identifier sent to the provider
    pub model: String,

    /// Base URL of the MCP server
    pub mcp_server_url: Url,

    /// Maximum provider round-trips per run
    pub max_steps: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `ANTHROPIC_API_KEY` is not set,
    /// or `ConfigError::InvalidValue` for unparsable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string()))?;

        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| "claude-3-5-sonnet-20240620".to_string());

        let mcp_server_url = std::env::var("MCP_SERVER_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let mcp_server_url = Url::parse(&mcp_server_url)
            .map_err(|e| ConfigError::InvalidValue("MCP_SERVER_URL".to_string(), format!("{}", e)))?;

        let max_steps = std::env::var("MAX_STEPS")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        Ok(Self {
            api_key,
            model,
            mcp_server_url,
            max_steps,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, mcp_server_url: Url) -> Self {
        Self {
            api_key,
            model,
            mcp_server_url,
            max_steps: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_the_default_step_budget() {
        let config = Config::new(
            "key".to_string(),
            "model".to_string(),
            Url::parse("http://localhost:8080").unwrap(),
        );
        assert_eq!(config.max_steps, 20);
        assert_eq!(config.mcp_server_url.as_str(), "http://localhost:8080/");
    }
}
