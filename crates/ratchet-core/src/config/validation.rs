//! Configuration validation
//!
//! Runs eagerly when a config is loaded, before any commit is processed.

use std::collections::HashSet;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Placeholders a tag template may carry
const TAG_PLACEHOLDERS: &[&str] = &["$version", "$major", "$minor", "$patch", "$prerelease"];

/// Validate a configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_tag_format(&config.version.tag_format)?;
    validate_type_order(&config.changelog.order)?;
    validate_increments(config)?;
    Ok(())
}

/// The tag template must name the full version or enough components to
/// reconstruct one, or rendered tags could never be parsed back
fn validate_tag_format(tag_format: &str) -> Result<()> {
    let has_version = tag_format.contains("$version");
    let has_components = tag_format.contains("$major")
        && tag_format.contains("$minor")
        && tag_format.contains("$patch");

    if !has_version && !has_components {
        return Err(ConfigError::InvalidTagTemplate(tag_format.to_string()).into());
    }

    // Reject $-tokens that look like placeholders but aren't recognized
    for token in tag_format.split('$').skip(1) {
        let known = TAG_PLACEHOLDERS
            .iter()
            .any(|p| token.starts_with(&p[1..]));
        if !known {
            return Err(ConfigError::InvalidValue {
                field: "version.tag_format".to_string(),
                message: format!("unknown placeholder near '${token}'"),
            }
            .into());
        }
    }

    Ok(())
}

/// Duplicate entries in a caller-supplied change-type ordering are a
/// configuration error, not something to silently dedupe
fn validate_type_order(order: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in order {
        if !seen.insert(entry.as_str()) {
            return Err(ConfigError::DuplicateChangeType(entry.clone()).into());
        }
    }
    Ok(())
}

fn validate_increments(config: &Config) -> Result<()> {
    for (key, type_config) in &config.changelog.types {
        if let Some(increment) = &type_config.increment {
            if !matches!(increment.as_str(), "major" | "minor" | "patch") {
                return Err(ConfigError::InvalidValue {
                    field: format!("changelog.types.{key}.increment"),
                    message: format!("expected major, minor or patch, got '{increment}'"),
                }
                .into());
            }
        }
    }
    Ok(())
}
