//! Markdown changelog renderer

use tracing::debug;

use super::ChangelogRenderer;
use crate::types::ReleaseBucket;

/// Markdown renderer: `##` release titles, `###` type sections,
/// dash-bulleted entries
pub struct MarkdownRenderer {
    /// Render entry scopes as a bold prefix
    pub include_scopes: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with default settings
    pub fn new() -> Self {
        Self {
            include_scopes: true,
        }
    }

    /// Toggle scope prefixes
    pub fn with_scopes(mut self, include: bool) -> Self {
        self.include_scopes = include;
        self
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogRenderer for MarkdownRenderer {
    fn render(&self, buckets: &[ReleaseBucket]) -> String {
        let mut output = String::new();

        for bucket in buckets {
            if bucket.is_empty() {
                continue;
            }

            match bucket.date {
                Some(date) => {
                    output.push_str(&format!("## {} ({})\n", bucket.label, date.format("%Y-%m-%d")))
                }
                None => output.push_str(&format!("## {}\n", bucket.label)),
            }

            for section in &bucket.sections {
                output.push('\n');
                output.push_str(&format!("### {}\n\n", section.title));

                for entry in &section.entries {
                    match (&entry.scope, self.include_scopes) {
                        (Some(scope), true) => {
                            output.push_str(&format!("- **{}:** {}\n", scope, entry.message))
                        }
                        _ => output.push_str(&format!("- {}\n", entry.message)),
                    }
                }
            }

            output.push('\n');
        }

        let output = output.trim_end().to_string();
        debug!(output_len = output.len(), "rendered markdown changelog");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChangeEntry, TypeSection};
    use chrono::NaiveDate;

    fn entry(message: &str, scope: Option<&str>) -> ChangeEntry {
        ChangeEntry {
            scope: scope.map(String::from),
            breaking: false,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_render_unreleased_bucket() {
        let mut bucket = ReleaseBucket::new("Unreleased");
        let mut section = TypeSection::new("feat", "Features");
        section.entries.push(entry("add export command", None));
        bucket.add_section(section);

        let output = MarkdownRenderer::new().render(&[bucket]);

        assert_eq!(output, "## Unreleased\n\n### Features\n\n- add export command");
    }

    #[test]
    fn test_render_release_with_date_and_scope() {
        let mut bucket = ReleaseBucket::new("1.2.0")
            .with_tag("v1.2.0")
            .with_date(NaiveDate::from_ymd_opt(2024, 5, 4).unwrap());
        let mut section = TypeSection::new("fix", "Bug Fixes");
        section.entries.push(entry("handle empty input", Some("cli")));
        bucket.add_section(section);

        let output = MarkdownRenderer::new().render(&[bucket]);

        assert!(output.starts_with("## 1.2.0 (2024-05-04)"));
        assert!(output.contains("- **cli:** handle empty input"));
    }

    #[test]
    fn test_render_skips_empty_buckets() {
        let buckets = vec![ReleaseBucket::new("Unreleased")];
        assert_eq!(MarkdownRenderer::new().render(&buckets), "");
    }

    #[test]
    fn test_render_multiple_buckets_newest_first() {
        let mut unreleased = ReleaseBucket::new("Unreleased");
        let mut section = TypeSection::new("feat", "Features");
        section.entries.push(entry("pending", None));
        unreleased.add_section(section);

        let mut released = ReleaseBucket::new("1.0.0");
        let mut section = TypeSection::new("fix", "Bug Fixes");
        section.entries.push(entry("shipped", None));
        released.add_section(section);

        let output = MarkdownRenderer::new().render(&[unreleased, released]);

        let unreleased_at = output.find("## Unreleased").unwrap();
        let released_at = output.find("## 1.0.0").unwrap();
        assert!(unreleased_at < released_at);
    }
}
