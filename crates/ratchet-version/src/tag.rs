//! Tag-name template
//!
//! The same template both renders a tag from a version and parses a
//! version back out of a tag name, so rendered tags always stay
//! recognizable as release boundaries.

use regex::Regex;

use ratchet_core::error::ConfigError;

use crate::traits::VersionScheme;
use crate::types::Version;

/// A tag-name template with `$version`, `$major`, `$minor`, `$patch` and
/// `$prerelease` placeholders
#[derive(Debug, Clone)]
pub struct TagTemplate {
    template: String,
    pattern: Regex,
}

impl TagTemplate {
    /// Compile a template. A template that names neither `$version` nor
    /// all of `$major`/`$minor`/`$patch` could never be parsed back and
    /// is rejected eagerly.
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();

        let has_version = template.contains("$version");
        let has_components = template.contains("$major")
            && template.contains("$minor")
            && template.contains("$patch");
        if !has_version && !has_components {
            return Err(ConfigError::InvalidTagTemplate(template));
        }

        let mut source = regex::escape(&template);
        for (placeholder, group) in [
            ("\\$version", r"(?P<version>[0-9][0-9A-Za-z.!+-]*)"),
            ("\\$major", r"(?P<major>\d+)"),
            ("\\$minor", r"(?P<minor>\d+)"),
            ("\\$patch", r"(?P<patch>\d+)"),
            ("\\$prerelease", r"(?P<prerelease>[0-9A-Za-z.-]*)"),
        ] {
            source = source.replace(placeholder, group);
        }

        let pattern = Regex::new(&format!("^{source}$"))
            .map_err(|_| ConfigError::InvalidTagTemplate(template.clone()))?;

        Ok(Self { template, pattern })
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Render a tag name for a version
    pub fn render(&self, version: &Version, scheme: &dyn VersionScheme) -> String {
        let prerelease = version
            .prerelease
            .map(|(kind, ordinal)| format!("{kind}.{ordinal}"))
            .unwrap_or_default();

        self.template
            .replace("$version", &scheme.render(version))
            .replace("$major", &version.major().to_string())
            .replace("$minor", &version.minor().to_string())
            .replace("$patch", &version.patch().to_string())
            .replace("$prerelease", &prerelease)
    }

    /// Parse a version back out of a tag name. `None` means the tag does
    /// not mark a release under this template and scheme.
    pub fn extract(&self, tag: &str, scheme: &dyn VersionScheme) -> Option<Version> {
        let caps = self.pattern.captures(tag)?;

        if let Some(version) = caps.name("version") {
            return scheme.parse(version.as_str()).ok();
        }

        let base = format!(
            "{}.{}.{}",
            caps.name("major")?.as_str(),
            caps.name("minor")?.as_str(),
            caps.name("patch")?.as_str()
        );

        let prerelease = caps
            .name("prerelease")
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty());

        // Prerelease separators differ per scheme; try both spellings.
        let candidates = match prerelease {
            Some(pre) => vec![format!("{base}-{pre}"), format!("{base}{pre}")],
            None => vec![base],
        };

        candidates
            .into_iter()
            .find_map(|candidate| scheme.parse(&candidate).ok())
    }
}
