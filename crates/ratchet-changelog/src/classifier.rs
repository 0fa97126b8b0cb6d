//! Commit message classification
//!
//! The classifier is built once per run from configuration and holds its
//! compiled patterns as fields; there is no process-wide state.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use ratchet_core::config::{ChangelogConfig, Config};
use ratchet_core::error::{ConfigError, Result};
use ratchet_git::CommitRecord;
use ratchet_version::Increment;

/// Canonical key for breaking-change entries
pub const BREAKING_CHANGE: &str = "BREAKING CHANGE";

/// One change type in the classifier vocabulary
#[derive(Debug, Clone)]
pub struct TypeSpec {
    /// Commit type token (feat, fix, ...)
    pub key: String,
    /// Section header in the changelog
    pub section: String,
    /// Increment this type maps to
    pub increment: Increment,
    /// Whether the type is hidden from the changelog
    pub hidden: bool,
}

/// Classifier settings, derived from configuration
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    /// Vocabulary in display order
    pub types: Vec<TypeSpec>,
    /// Map breaking changes to MINOR while in the 0.x range
    pub major_version_zero: bool,
}

impl ClassifierSettings {
    /// Derive settings from a loaded configuration.
    ///
    /// The display order lists configured types first, followed by the
    /// remaining vocabulary in name order.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::from_changelog_config(&config.changelog, config.version.major_version_zero)
    }

    /// Derive settings from the changelog section alone
    pub fn from_changelog_config(
        changelog: &ChangelogConfig,
        major_version_zero: bool,
    ) -> Result<Self> {
        let mut types = Vec::new();
        let mut seen = HashSet::new();

        for key in &changelog.order {
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateChangeType(key.clone()).into());
            }
            if let Some(type_config) = changelog.types.get(key) {
                types.push(spec_from_config(key, type_config)?);
            }
        }

        let mut remaining: Vec<&String> = changelog
            .types
            .keys()
            .filter(|k| !seen.contains(*k))
            .collect();
        remaining.sort();
        for key in remaining {
            types.push(spec_from_config(key, &changelog.types[key])?);
        }

        Ok(Self {
            types,
            major_version_zero,
        })
    }
}

fn spec_from_config(
    key: &str,
    type_config: &ratchet_core::config::ChangeTypeConfig,
) -> Result<TypeSpec> {
    let increment = match &type_config.increment {
        Some(name) => Increment::from_name(name).ok_or_else(|| ConfigError::InvalidValue {
            field: format!("changelog.types.{key}.increment"),
            message: format!("unknown increment '{name}'"),
        })?,
        None => Increment::None,
    };

    Ok(TypeSpec {
        key: key.to_string(),
        section: type_config.section.clone(),
        increment,
        hidden: type_config.hidden,
    })
}

/// A classified commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Change type key from the vocabulary
    pub change_type: String,
    /// Scope from the head pattern
    pub scope: Option<String>,
    /// Breaking flag
    pub breaking: bool,
    /// Description text
    pub message: String,
    /// Increment this change maps to
    pub increment: Increment,
}

/// Commit message classifier with vocabulary-driven head pattern
pub struct Classifier {
    head: Regex,
    settings: ClassifierSettings,
}

impl Classifier {
    /// Build a classifier from settings, compiling the head pattern from
    /// the vocabulary
    pub fn new(settings: ClassifierSettings) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &settings.types {
            if !seen.insert(spec.key.as_str()) {
                return Err(ConfigError::DuplicateChangeType(spec.key.clone()).into());
            }
        }

        // Longest alternatives first so e.g. `build` wins over a
        // hypothetical `b` type.
        let mut alternatives: Vec<String> = settings
            .types
            .iter()
            .map(|spec| {
                if spec.key == BREAKING_CHANGE {
                    "BREAKING[- ]CHANGE".to_string()
                } else {
                    regex::escape(&spec.key)
                }
            })
            .collect();
        alternatives.sort_by_key(|a| std::cmp::Reverse(a.len()));

        let head = Regex::new(&format!(
            r"^(?P<type>{})(?:\((?P<scope>[^()\r\n]*)\))?(?P<breaking>!)?:\s+(?P<description>.+)$",
            alternatives.join("|")
        ))
        .map_err(|e| ConfigError::InvalidValue {
            field: "changelog.types".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self { head, settings })
    }

    /// The settings this classifier was built from
    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify a commit message.
    ///
    /// The head pattern applies to the first line; a body paragraph
    /// starting with a breaking-change notice sets the breaking flag.
    /// Messages outside the vocabulary return `None` and take no part in
    /// increment aggregation or changelog bucketing.
    pub fn classify(&self, message: &str) -> Option<Classified> {
        let mut lines = message.lines();
        let head_line = lines.next()?.trim_end();

        let caps = self.head.captures(head_line)?;

        let type_token = caps.name("type")?.as_str();
        let change_type = if self.head_is_breaking(type_token) {
            BREAKING_CHANGE.to_string()
        } else {
            type_token.to_string()
        };

        let scope = caps
            .name("scope")
            .map(|m| m.as_str().to_string())
            .filter(|s| !s.is_empty());

        let breaking = change_type == BREAKING_CHANGE
            || caps.name("breaking").is_some()
            || body_has_breaking_notice(lines);

        let increment = if breaking {
            self.breaking_increment()
        } else {
            self.spec_for(&change_type)
                .map(|spec| spec.increment)
                .unwrap_or_default()
        };

        Some(Classified {
            change_type,
            scope,
            breaking,
            message: caps.name("description")?.as_str().trim().to_string(),
            increment,
        })
    }

    /// Aggregate increment over a commit set: the maximum over classified
    /// commits, with MAJOR short-circuiting the scan
    pub fn aggregate_increment<'a, I>(&self, commits: I) -> Increment
    where
        I: IntoIterator<Item = &'a CommitRecord>,
    {
        let mut aggregate = Increment::None;
        for commit in commits {
            if let Some(classified) = self.classify(&commit.full_message()) {
                aggregate = aggregate.max(classified.increment);
                if aggregate == Increment::Major {
                    break;
                }
            }
        }
        debug!(increment = %aggregate, "aggregated increment");
        aggregate
    }

    /// Look up a type spec by key
    pub fn spec_for(&self, key: &str) -> Option<&TypeSpec> {
        self.settings.types.iter().find(|spec| spec.key == key)
    }

    fn head_is_breaking(&self, type_token: &str) -> bool {
        type_token == BREAKING_CHANGE || type_token == "BREAKING-CHANGE"
    }

    /// The increment a breaking change maps to under the current policy
    fn breaking_increment(&self) -> Increment {
        if self.settings.major_version_zero {
            Increment::Minor
        } else {
            Increment::Major
        }
    }
}

/// True when any blank-line-delimited paragraph opens with a
/// breaking-change notice
fn body_has_breaking_notice<'a, I>(lines: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let mut at_paragraph_start = true;
    for line in lines {
        if line.trim().is_empty() {
            at_paragraph_start = true;
            continue;
        }
        if at_paragraph_start
            && (line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:"))
        {
            return true;
        }
        at_paragraph_start = false;
    }
    false
}
