//! Configuration management for the CLI.
//!
//! This module handles loading configuration from `zod-doc.toml` files
//! and merging with command-line arguments.

use crate::error::{CliResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "zod-doc.toml";

/// Main configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input configuration.
    pub input: InputConfig,

    /// Output configuration.
    pub output: OutputConfig,

    /// Logging configuration.
    pub log: LogConfig,
}

/// Input configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Path to the JSON schema document.
    pub document: PathBuf,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the generated model file.
    pub file: PathBuf,

    /// Whether to pretty-print the model JSON.
    pub pretty: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from("schemas.json"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("models.json"),
            pretty: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// If the path is None, attempts to load from the default location and
    /// returns default configuration when no file exists there. An explicit
    /// path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::not_found(path.to_path_buf()).into())
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(CONFIG_FILENAME),
        };

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::invalid_toml(config_path, e.to_string()))?;

        Ok(config)
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref document) = args.document {
            config.input.document = document.clone();
        }

        if let Some(ref output) = args.output {
            config.output.file = output.clone();
        }

        if let Some(pretty) = args.pretty {
            config.output.pretty = pretty;
        }

        if let Some(ref level) = args.log_level {
            config.log.level = level.clone();
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# zod-doc configuration file

[input]
# JSON schema document exported from the TypeScript project
document = "schemas.json"

[output]
# File the documentation models are written to
file = "models.json"

# Pretty-print the JSON output
pretty = true

[log]
# Default log filter (error, warn, info, debug, trace); RUST_LOG overrides it
level = "warn"
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default)]
pub struct CliArgs {
    /// Schema document override.
    pub document: Option<PathBuf>,

    /// Output file override.
    pub output: Option<PathBuf>,

    /// Pretty-print override.
    pub pretty: Option<bool>,

    /// Log level override.
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.input.document, PathBuf::from("schemas.json"));
        assert_eq!(config.output.file, PathBuf::from("models.json"));
        assert!(config.output.pretty);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_merge_cli_args_overrides() {
        let config = Config::default();
        let args = CliArgs {
            output: Some(PathBuf::from("docs/models.json")),
            pretty: Some(false),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };

        let merged = ConfigManager::merge_cli_args(config, &args);
        assert_eq!(merged.output.file, PathBuf::from("docs/models.json"));
        assert!(!merged.output.pretty);
        assert_eq!(merged.log.level, "debug");
        assert_eq!(merged.input.document, PathBuf::from("schemas.json"));
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let args = CliArgs::default();

        let merged = ConfigManager::merge_cli_args(config.clone(), &args);
        assert_eq!(merged.input.document, config.input.document);
        assert_eq!(merged.output.file, config.output.file);
        assert_eq!(merged.output.pretty, config.output.pretty);
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[input]
document = "build/zod.json"

[output]
file = "docs/models.json"
pretty = false
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.document, PathBuf::from("build/zod.json"));
        assert_eq!(config.output.file, PathBuf::from("docs/models.json"));
        assert!(!config.output.pretty);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config: Config = toml::from_str(ConfigManager::default_config_content()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.input.document, defaults.input.document);
        assert_eq!(config.output.file, defaults.output.file);
        assert_eq!(config.output.pretty, defaults.output.pretty);
        assert_eq!(config.log.level, defaults.log.level);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = ConfigManager::load(Some(Path::new("does-not-exist/zod-doc.toml"))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Config(ConfigError::NotFound { .. })
        ));
    }
}
