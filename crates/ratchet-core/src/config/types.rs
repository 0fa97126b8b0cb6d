//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::defaults::{default_change_types, default_type_order};

/// Main configuration for ratchet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name
    pub name: Option<String>,

    /// Versioning configuration
    pub version: VersionConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            version: VersionConfig::default(),
            changelog: ChangelogConfig::default(),
        }
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Version scheme (pep440 or semver)
    pub scheme: String,

    /// Tag template with $version/$major/$minor/$patch/$prerelease
    /// placeholders, used both to render and to parse tag names
    pub tag_format: String,

    /// Map breaking changes to MINOR instead of MAJOR while the project
    /// stays in the 0.x range
    pub major_version_zero: bool,

    /// Ordinal a fresh prerelease starts at
    pub prerelease_offset: u64,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            scheme: "pep440".to_string(),
            tag_format: "v$version".to_string(),
            major_version_zero: false,
            prerelease_offset: 0,
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Whether bump runs update the changelog
    pub enabled: bool,

    /// Changelog file path
    pub file: PathBuf,

    /// Markup dialect (markdown, textile, asciidoc, restructuredtext).
    /// Inferred from the file extension when unset.
    pub dialect: Option<String>,

    /// Label for the not-yet-released block
    pub unreleased_label: String,

    /// Fold prerelease tags into the next full release's bucket instead
    /// of giving them their own entries
    pub merge_prereleases: bool,

    /// Display order of change types; validated for duplicates
    pub order: Vec<String>,

    /// Per-change-type settings, keyed by the commit type token
    pub types: HashMap<String, ChangeTypeConfig>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: PathBuf::from("CHANGELOG.md"),
            dialect: None,
            unreleased_label: "Unreleased".to_string(),
            merge_prereleases: false,
            order: default_type_order(),
            types: default_change_types(),
        }
    }
}

/// Configuration for a single change type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeTypeConfig {
    /// Section header in the changelog
    pub section: String,

    /// Whether to hide this type from the changelog
    #[serde(default)]
    pub hidden: bool,

    /// Version increment this type maps to (major, minor, patch);
    /// absent means the type never triggers a release on its own
    #[serde(default)]
    pub increment: Option<String>,
}

impl ChangeTypeConfig {
    /// Create a visible type with a section header
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            hidden: false,
            increment: None,
        }
    }

    /// Set the increment this type maps to
    pub fn with_increment(mut self, increment: impl Into<String>) -> Self {
        self.increment = Some(increment.into());
        self
    }

    /// Hide this type from the changelog
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version.scheme, "pep440");
        assert_eq!(config.version.tag_format, "v$version");
        assert!(!config.version.major_version_zero);
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
    }

    #[test]
    fn test_default_types_cover_order() {
        let config = ChangelogConfig::default();
        for key in &config.order {
            assert!(config.types.contains_key(key), "missing type {key}");
        }
    }

    #[test]
    fn test_change_type_builder() {
        let t = ChangeTypeConfig::new("Features").with_increment("minor");
        assert_eq!(t.section, "Features");
        assert_eq!(t.increment.as_deref(), Some("minor"));
        assert!(!t.hidden);
    }
}
