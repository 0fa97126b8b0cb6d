//! AsciiDoc changelog parser

use regex::Regex;

use super::{version_pattern, Dialect};

/// AsciiDoc dialect: `=`-prefixed headings, depth is the equals count.
///
/// Release titles routinely postfix a link label
/// (`== https://host/compare/v0.1.0\...v0.2.0[0.2.0]`), so the version
/// is taken from the LAST version-shaped hit on the line.
pub struct AsciiDoc {
    title: Regex,
    version: Regex,
}

impl AsciiDoc {
    /// Create the parser with its compiled patterns
    pub fn new() -> Self {
        Self {
            title: Regex::new(r"^(?P<equals>=+)\s").expect("Invalid regex"),
            version: version_pattern(),
        }
    }
}

impl Default for AsciiDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for AsciiDoc {
    fn name(&self) -> &'static str {
        "asciidoc"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["adoc", "asciidoc"]
    }

    fn title_level(&self, line: &str) -> Option<usize> {
        self.title.captures(line).map(|caps| caps["equals"].len())
    }

    fn version_from_title(&self, line: &str) -> Option<String> {
        self.title_level(line)?;
        self.version
            .find_iter(line)
            .last()
            .map(|m| m.as_str().to_string())
    }
}
