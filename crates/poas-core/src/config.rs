//! POAS Configuration Management
//!
//! Handles configuration from environment variables and TOML config files,
//! with defaults matching the conventional working-directory layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Input and output locations
    pub paths: PathsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from an optional TOML file, with environment overrides on top
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?.with_env_override()?,
            None => Self::from_env()?,
        };
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        Self::from_toml_str(&content).map_err(|message| ConfigError::ParseError { path, message })
    }

    fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        self.apply_env(|key| std::env::var(key).ok())?;
        Ok(self)
    }

    /// Apply overrides from a variable lookup
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let paths = &mut self.paths;
        for (key, slot) in [
            ("POAS_PATTERNS", &mut paths.patterns),
            ("POAS_RULES_OUTPUT", &mut paths.rules_output),
            ("POAS_DEPENDENCIES", &mut paths.dependencies),
            ("POAS_TREE_INPUT_DIR", &mut paths.tree_input_dir),
            ("POAS_TREE_OUTPUT_DIR", &mut paths.tree_output_dir),
            ("POAS_BASE_TTL", &mut paths.base_ttl),
        ] {
            if let Some(value) = lookup(key) {
                *slot = PathBuf::from(value);
            }
        }

        // Comma-separated list of merged domain files
        if let Some(outputs) = lookup("POAS_DOMAIN_OUTPUT") {
            paths.domain_outputs = outputs
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        if let Some(outputs) = lookup("POAS_SENTENCE_OUTPUT") {
            paths.sentence_outputs = outputs
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.json_format = match format.to_lowercase().as_str() {
                "json" => true,
                "text" | "pretty" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_FORMAT".to_string(),
                        value: format,
                    })
                }
            };
        }

        Ok(())
    }
}

/// File locations used by the generator jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Pattern rule source
    pub patterns: PathBuf,

    /// Generated rule blocks
    pub rules_output: PathBuf,

    /// Hand-maintained dependency individuals merged ahead of the rules
    pub dependencies: PathBuf,

    /// Merged domain files (dependencies + rules)
    pub domain_outputs: Vec<PathBuf>,

    /// Directory of tab-separated tree files
    pub tree_input_dir: PathBuf,

    /// Directory receiving `outputNN.ttl` files
    pub tree_output_dir: PathBuf,

    /// Existing Turtle file that sentence words are appended to
    pub base_ttl: PathBuf,

    /// Files receiving base + sentence words
    pub sentence_outputs: Vec<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            patterns: PathBuf::from("patterns.txt"),
            rules_output: PathBuf::from("rdf_output.txt"),
            dependencies: PathBuf::from("dependencies.txt"),
            domain_outputs: vec![PathBuf::from("domain.ttl")],
            tree_input_dir: PathBuf::from("inputFiles/new"),
            tree_output_dir: PathBuf::from("outputFiles"),
            base_ttl: PathBuf::from("outputFiles/output03.ttl"),
            sentence_outputs: vec![PathBuf::from("generated/1.ttl")],
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,

    /// Include file/line in logs
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            include_location: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
