//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.reviewdeck.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Review service settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// File intake settings.
    #[serde(default)]
    pub intake: IntakeConfig,
}

/// Review service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the review service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    ///
    /// Analysis of a large batch can take a while on the provider side;
    /// once a request is sent there is no abort path besides this timeout.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    300
}

/// File intake settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// File extensions the intake filter accepts.
    #[serde(default = "crate::intake::default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            extensions: crate::intake::default_extensions(),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".reviewdeck.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Server URL - always override since it has a default in the CLI
        self.server.base_url = args.server.clone();

        // Timeout - only override if explicitly provided via CLI
        if let Some(timeout) = args.timeout {
            self.server.timeout_seconds = timeout;
        }

        // Extensions - only override if provided
        if let Some(ref extensions) = args.extensions {
            self.intake.extensions = extensions.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.timeout_seconds, 300);
        assert!(config.intake.extensions.contains(&"rs".to_string()));
        assert!(config.intake.extensions.contains(&"txt".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[server]
base_url = "http://reviews.internal:9000"
timeout_seconds = 60

[intake]
extensions = ["rs", "py"]
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.server.base_url, "http://reviews.internal:9000");
        assert_eq!(config.server.timeout_seconds, 60);
        assert_eq!(config.intake.extensions, vec!["rs", "py"]);
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("[server]\ntimeout_seconds = 10\n").unwrap();
        assert_eq!(config.server.base_url, "http://localhost:8000");
        assert_eq!(config.server.timeout_seconds, 10);
        assert!(!config.intake.extensions.is_empty());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[intake]"));
    }
}
