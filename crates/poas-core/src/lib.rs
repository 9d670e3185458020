//! POAS Core - Vocabulary, lookup tables and shared types
//!
//! This crate defines the pieces shared by every POAS generator:
//! - The dependency classification table
//! - Turtle rendering primitives (prefix preamble, named individuals)
//! - Common error types
//! - Configuration management

pub mod config;
pub mod dependency;
pub mod turtle;

pub use config::{AppConfig, ConfigError, LoggingConfig, PathsConfig};
pub use dependency::{DependencyClass, DependencyTable, NONE_SUBTYPE, UNKNOWN_SUBTYPE};
pub use turtle::{Individual, PREAMBLE};

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for POAS operations
#[derive(Error, Debug)]
pub enum PoasError {
    #[error("Input file not found: {}", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PoasError {
    /// Map an IO error on an input path, turning `NotFound` into `MissingInputFile`
    pub fn from_input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::MissingInputFile { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Map an IO error on an output path
    pub fn from_output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error only affects a single line of input
    pub fn is_line_level(&self) -> bool {
        matches!(self, Self::MalformedLine { .. })
    }
}

pub type Result<T> = std::result::Result<T, PoasError>;

// ============================================================================
// Tests
// ============================================================================
