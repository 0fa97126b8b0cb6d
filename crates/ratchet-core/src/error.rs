//! Error types for ratchet

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RatchetError
pub type Result<T> = std::result::Result<T, RatchetError>;

/// Main error type for ratchet operations
#[derive(Debug, Error)]
pub enum RatchetError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
///
/// All of these are detected eagerly, before any commit is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// A change type appears more than once in the configured ordering
    #[error("Duplicate change type in ordering: {0}")]
    DuplicateChangeType(String),

    /// The tag template carries no usable placeholder
    #[error("Tag template '{0}' is missing a version placeholder")]
    InvalidTagTemplate(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// A version string failed to parse under the active scheme.
    /// Always surfaced, never guessed around.
    #[error("Failed to parse version '{input}' under the {scheme} scheme")]
    Parse { input: String, scheme: String },

    /// Unknown version scheme name
    #[error("Unknown version scheme: {0}")]
    UnknownScheme(String),
}

impl VersionError {
    /// Build a parse failure for the given input and scheme name
    pub fn parse(input: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            scheme: scheme.into(),
        }
    }
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// No commit mapped to a non-NONE increment and no override was given.
    /// A normal outcome for doc-only change sets; callers exit cleanly
    /// instead of cutting an empty release.
    #[error("No eligible changes found - nothing to release")]
    NoEligibleChanges,

    /// Unknown changelog dialect name
    #[error("Unknown changelog dialect: {0}")]
    UnknownDialect(String),

    /// Failed to write changelog
    #[error("Failed to write changelog: {0}")]
    WriteFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RatchetError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}
