//! Markdown changelog parser

use regex::Regex;

use super::{version_pattern, Dialect};

/// Markdown dialect: `#`-prefixed headings, depth is the hash count
pub struct Markdown {
    title: Regex,
    version: Regex,
}

impl Markdown {
    /// Create the parser with its compiled patterns
    pub fn new() -> Self {
        Self {
            title: Regex::new(r"^(?P<hashes>#+)\s").expect("Invalid regex"),
            version: version_pattern(),
        }
    }
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Markdown {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn title_level(&self, line: &str) -> Option<usize> {
        self.title
            .captures(line)
            .map(|caps| caps["hashes"].len())
    }

    fn version_from_title(&self, line: &str) -> Option<String> {
        self.title_level(line)?;
        self.version
            .find(line)
            .map(|m| m.as_str().to_string())
    }
}
