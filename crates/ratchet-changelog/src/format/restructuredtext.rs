//! reStructuredText changelog parser
//!
//! RST titles span two or three physical lines: underlined (text plus a
//! same-or-longer adornment line) or overlined (adornment, text,
//! matching adornment). Two titles are at the same depth only when both
//! the adornment character AND the over/under-lined-ness match, so this
//! dialect replaces the single-line scan with a 3-line sliding window
//! and shares only the metadata assembly.

use regex::Regex;

use super::{close_unreleased, normalize_version, version_pattern, Dialect};
use crate::types::ChangelogMetadata;

/// Characters RST accepts as title adornment
const ADORNMENT_CHARS: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// A title's depth identity: adornment character and over/under-ness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TitleKind {
    adornment: char,
    overlined: bool,
}

/// A matched title in the sliding window
struct TitleMatch {
    kind: TitleKind,
    /// Index of the text line within the title
    text_index: usize,
    /// Physical lines the title spans
    span: usize,
}

/// reStructuredText dialect
pub struct RestructuredText {
    version: Regex,
}

impl RestructuredText {
    /// Create the parser with its compiled patterns
    pub fn new() -> Self {
        Self {
            version: version_pattern(),
        }
    }

    /// Try to match a title starting at `index`. Overlined titles are
    /// checked first; their trailing adornment would otherwise re-match
    /// as the underline of a bogus two-line title.
    fn title_at(&self, lines: &[String], index: usize) -> Option<TitleMatch> {
        // Overlined: adornment / text / matching adornment
        if index + 2 < lines.len() {
            if let Some(over) = adornment_char(&lines[index]) {
                let text = &lines[index + 1];
                if !text.trim().is_empty()
                    && adornment_char(text).is_none()
                    && adornment_char(&lines[index + 2]) == Some(over)
                {
                    return Some(TitleMatch {
                        kind: TitleKind {
                            adornment: over,
                            overlined: true,
                        },
                        text_index: index + 1,
                        span: 3,
                    });
                }
            }
        }

        // Underlined: text / same-or-longer adornment
        if index + 1 < lines.len() {
            let text = &lines[index];
            if !text.trim().is_empty() && adornment_char(text).is_none() {
                if let Some(under) = adornment_char(&lines[index + 1]) {
                    let underline_len = lines[index + 1].trim_end().chars().count();
                    if underline_len >= text.trim_end().chars().count() {
                        return Some(TitleMatch {
                            kind: TitleKind {
                                adornment: under,
                                overlined: false,
                            },
                            text_index: index,
                            span: 2,
                        });
                    }
                }
            }
        }

        None
    }
}

impl Default for RestructuredText {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for RestructuredText {
    fn name(&self) -> &'static str {
        "restructuredtext"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["rst"]
    }

    /// Single lines carry no depth in RST; depth lives in the
    /// multi-line window handled by [`Dialect::extract_metadata`]
    fn title_level(&self, _line: &str) -> Option<usize> {
        None
    }

    fn version_from_title(&self, line: &str) -> Option<String> {
        self.version.find(line).map(|m| m.as_str().to_string())
    }

    fn extract_metadata(&self, lines: &[String]) -> ChangelogMetadata {
        let mut meta = ChangelogMetadata::default();
        let mut unreleased_kind: Option<TitleKind> = None;

        let mut index = 0;
        while index < lines.len() {
            let Some(title) = self.title_at(lines, index) else {
                index += 1;
                continue;
            };

            let text = &lines[title.text_index];

            if meta.unreleased_start.is_none() && text.to_lowercase().contains("unreleased") {
                meta.unreleased_start = Some(index);
                unreleased_kind = Some(title.kind);
                index += title.span;
                continue;
            }

            if meta.unreleased_start.is_some()
                && meta.unreleased_end.is_none()
                && unreleased_kind == Some(title.kind)
            {
                meta.unreleased_end = Some(index);
            }

            if let Some(token) = self.version_from_title(text) {
                meta.latest_version = Some(normalize_version(&token));
                meta.latest_version_tag = Some(token);
                meta.latest_version_position = Some(index);
                break;
            }

            // Skipping the whole span keeps an overlined title's own
            // underline from re-matching as a two-line title.
            index += title.span;
        }

        close_unreleased(&mut meta, lines.len());
        meta
    }
}

/// The repeated adornment character of a line, when the line is made of
/// one repeated punctuation character
fn adornment_char(line: &str) -> Option<char> {
    let trimmed = line.trim_end();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    if !ADORNMENT_CHARS.contains(first) {
        return None;
    }
    if chars.any(|c| c != first) {
        return None;
    }
    if trimmed.len() < 2 {
        return None;
    }
    Some(first)
}
