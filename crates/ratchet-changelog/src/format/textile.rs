//! Textile changelog parser

use regex::Regex;

use super::{version_pattern, Dialect};

/// Textile dialect: `h<N>.` headings, depth is N
pub struct Textile {
    title: Regex,
    version: Regex,
}

impl Textile {
    /// Create the parser with its compiled patterns
    pub fn new() -> Self {
        Self {
            title: Regex::new(r"^h(?P<level>[1-6])\.\s").expect("Invalid regex"),
            version: version_pattern(),
        }
    }
}

impl Default for Textile {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for Textile {
    fn name(&self) -> &'static str {
        "textile"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["textile"]
    }

    fn title_level(&self, line: &str) -> Option<usize> {
        self.title
            .captures(line)
            .and_then(|caps| caps["level"].parse().ok())
    }

    fn version_from_title(&self, line: &str) -> Option<String> {
        self.title_level(line)?;
        self.version.find(line).map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::super::to_lines;
    use super::*;

    #[test]
    fn test_title_level() {
        let textile = Textile::new();
        assert_eq!(textile.title_level("h1. Changelog"), Some(1));
        assert_eq!(textile.title_level("h2. Unreleased"), Some(2));
        assert_eq!(textile.title_level("h7. too deep"), None);
        assert_eq!(textile.title_level("plain"), None);
    }

    #[test]
    fn test_version_from_title() {
        let textile = Textile::new();
        assert_eq!(
            textile.version_from_title("h2. 1.2.0 (2024-02-02)"),
            Some("1.2.0".to_string())
        );
        assert_eq!(textile.version_from_title("h2. Unreleased"), None);
    }

    #[test]
    fn test_extract_metadata() {
        let textile = Textile::new();
        let lines = to_lines(
            "h1. Changelog\n\nh2. Unreleased\n\n* pending\n\nh2. 0.5.0\n\n* released",
        );

        let meta = textile.extract_metadata(&lines);

        assert_eq!(meta.unreleased_start, Some(2));
        assert_eq!(meta.unreleased_end, Some(6));
        assert_eq!(meta.latest_version.as_deref(), Some("0.5.0"));
        assert_eq!(meta.latest_version_position, Some(6));
    }
}
