//! Changelog types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single classified change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    /// Scope from the commit head, if any
    pub scope: Option<String>,
    /// Whether the change is breaking
    pub breaking: bool,
    /// Change description
    pub message: String,
}

/// Changes of one type within a release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSection {
    /// Change type key (feat, fix, ...)
    pub change_type: String,
    /// Section header shown in the changelog
    pub title: String,
    /// Entries in commit order, newest first
    pub entries: Vec<ChangeEntry>,
}

impl TypeSection {
    /// Create an empty section
    pub fn new(change_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            change_type: change_type.into(),
            title: title.into(),
            entries: Vec::new(),
        }
    }

    /// Check if the section is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One release's worth of grouped changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseBucket {
    /// Release label: a version string, or the unreleased label
    pub label: String,
    /// Tag name the release came from, absent for unreleased changes
    pub tag: Option<String>,
    /// Release date
    pub date: Option<NaiveDate>,
    /// Type sections in configured display order
    pub sections: Vec<TypeSection>,
}

impl ReleaseBucket {
    /// Create an empty bucket
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: None,
            date: None,
            sections: Vec::new(),
        }
    }

    /// Set the tag name
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the release date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Add a non-empty section
    pub fn add_section(&mut self, section: TypeSection) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Check if the bucket has any content
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(TypeSection::is_empty)
    }
}

/// Positions and names extracted from an existing changelog document.
///
/// Recomputed on every run, never persisted. A document with no
/// recognizable headings yields the all-absent default; that is the
/// normal fresh-changelog case, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogMetadata {
    /// First line of the unreleased block
    pub unreleased_start: Option<usize>,
    /// Line after the unreleased block (exclusive)
    pub unreleased_end: Option<usize>,
    /// Latest released version, normalized
    pub latest_version: Option<String>,
    /// Latest released version as written in the document
    pub latest_version_tag: Option<String>,
    /// Line the latest version title starts on
    pub latest_version_position: Option<usize>,
}
