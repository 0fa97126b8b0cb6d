//! Changelog format parsers
//!
//! One shared scan routine drives every markup dialect through a small
//! capability pair: `title_level` and `version_from_title`.
//! reStructuredText, whose titles span several physical lines, overrides
//! the scan and shares only the metadata assembly.

mod asciidoc;
mod markdown;
mod restructuredtext;
mod textile;

pub use asciidoc::AsciiDoc;
pub use markdown::Markdown;
pub use restructuredtext::RestructuredText;
pub use textile::Textile;

use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use ratchet_core::error::ChangelogError;

use crate::types::ChangelogMetadata;

/// Loose version-shaped token: the parsers locate release titles without
/// committing to a scheme
pub(crate) fn version_pattern() -> Regex {
    Regex::new(r"v?\d+(?:\.\d+)+[0-9A-Za-z.!+-]*").expect("Invalid regex")
}

/// A changelog markup dialect
pub trait Dialect: Send + Sync {
    /// Get the name of this dialect
    fn name(&self) -> &'static str;

    /// File extensions this dialect claims
    fn extensions(&self) -> &'static [&'static str];

    /// Title depth of a line, `None` when the line is not a title
    fn title_level(&self, line: &str) -> Option<usize>;

    /// Version token written in a title line, `None` when the line is
    /// not a title or carries no version
    fn version_from_title(&self, line: &str) -> Option<String>;

    /// Extract unreleased-block and latest-release positions from a
    /// document. Never fails: a document with no recognizable headings
    /// is a fresh changelog and yields the all-absent default.
    fn extract_metadata(&self, lines: &[String]) -> ChangelogMetadata {
        scan_titles(self, lines)
    }
}

/// The shared top-to-bottom scan.
///
/// A normalized title containing "unreleased" opens the block; the next
/// title at the same depth closes it; the first version-bearing title
/// sets the latest release and stops the scan. An opened-but-unclosed
/// block closes at end-of-document.
pub(crate) fn scan_titles<D: Dialect + ?Sized>(dialect: &D, lines: &[String]) -> ChangelogMetadata {
    let mut meta = ChangelogMetadata::default();
    let mut unreleased_level: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        if let Some(level) = dialect.title_level(line) {
            if meta.unreleased_start.is_none() && line.to_lowercase().contains("unreleased") {
                meta.unreleased_start = Some(index);
                unreleased_level = Some(level);
                continue;
            }
            if meta.unreleased_start.is_some()
                && meta.unreleased_end.is_none()
                && unreleased_level == Some(level)
            {
                meta.unreleased_end = Some(index);
            }
        }

        if let Some(token) = dialect.version_from_title(line) {
            meta.latest_version = Some(normalize_version(&token));
            meta.latest_version_tag = Some(token);
            meta.latest_version_position = Some(index);
            break;
        }
    }

    close_unreleased(&mut meta, lines.len());
    debug!(dialect = dialect.name(), ?meta.unreleased_start, ?meta.latest_version, "extracted changelog metadata");
    meta
}

/// Close an open unreleased block: at the latest-release title when the
/// scan stopped there, else at end-of-document
pub(crate) fn close_unreleased(meta: &mut ChangelogMetadata, document_len: usize) {
    if meta.unreleased_start.is_some() && meta.unreleased_end.is_none() {
        meta.unreleased_end = Some(meta.latest_version_position.unwrap_or(document_len));
    }
}

/// Strip the tag decoration off a version token
pub(crate) fn normalize_version(token: &str) -> String {
    token
        .strip_prefix(['v', 'V'])
        .unwrap_or(token)
        .to_string()
}

/// Look up a dialect by configured name
pub fn dialect_by_name(name: &str) -> Result<Arc<dyn Dialect>, ChangelogError> {
    let dialect: Arc<dyn Dialect> = match name.to_lowercase().as_str() {
        "markdown" | "md" => Arc::new(Markdown::new()),
        "textile" => Arc::new(Textile::new()),
        "asciidoc" | "adoc" => Arc::new(AsciiDoc::new()),
        "restructuredtext" | "rst" => Arc::new(RestructuredText::new()),
        _ => return Err(ChangelogError::UnknownDialect(name.to_string())),
    };
    Ok(dialect)
}

/// Infer the dialect from a changelog file extension; Markdown is the
/// fallback for unknown extensions
pub fn guess_dialect(path: &Path) -> Arc<dyn Dialect> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    for dialect in [
        Arc::new(Markdown::new()) as Arc<dyn Dialect>,
        Arc::new(Textile::new()),
        Arc::new(AsciiDoc::new()),
        Arc::new(RestructuredText::new()),
    ] {
        if dialect.extensions().contains(&extension.as_str()) {
            return dialect;
        }
    }

    Arc::new(Markdown::new())
}

#[cfg(test)]
pub(crate) fn to_lines(document: &str) -> Vec<String> {
    document.lines().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_by_name() {
        assert_eq!(dialect_by_name("markdown").unwrap().name(), "markdown");
        assert_eq!(dialect_by_name("rst").unwrap().name(), "restructuredtext");
        assert!(matches!(
            dialect_by_name("docbook"),
            Err(ChangelogError::UnknownDialect(_))
        ));
    }

    #[test]
    fn test_guess_dialect_from_extension() {
        assert_eq!(guess_dialect(Path::new("CHANGELOG.md")).name(), "markdown");
        assert_eq!(guess_dialect(Path::new("CHANGELOG.adoc")).name(), "asciidoc");
        assert_eq!(
            guess_dialect(Path::new("CHANGELOG.rst")).name(),
            "restructuredtext"
        );
        assert_eq!(
            guess_dialect(Path::new("CHANGELOG.textile")).name(),
            "textile"
        );
        assert_eq!(guess_dialect(Path::new("CHANGELOG")).name(), "markdown");
    }

    #[test]
    fn test_normalize_version_strips_prefix() {
        assert_eq!(normalize_version("v1.2.3"), "1.2.3");
        assert_eq!(normalize_version("1.2.3"), "1.2.3");
    }
}
