//! PEP440-like version scheme
//!
//! Accepts the lenient spellings PEP 440 allows (separator variance,
//! `alpha`/`beta`/`c` aliases) and renders the normalized form.

use regex::Regex;

use ratchet_core::error::VersionError;

use crate::traits::{Result, VersionScheme};
use crate::types::{PrereleaseKind, Version};

/// PEP440-like version dialect
pub struct Pep440 {
    pattern: Regex,
}

impl Pep440 {
    /// Create the scheme with its compiled grammar
    pub fn new() -> Self {
        let pattern = Regex::new(
            r"(?ix)
            ^
            (?:(?P<epoch>\d+)!)?
            (?P<release>\d+(?:\.\d+)*)
            (?:[._-]?(?P<prelabel>a|b|c|rc|alpha|beta|pre|preview)[._-]?(?P<prenum>\d+)?)?
            (?:[._-]?(?P<devmarker>dev)[._-]?(?P<devnum>\d+)?)?
            (?:\+(?P<local>[a-z0-9]+(?:[._-][a-z0-9]+)*))?
            $
            ",
        )
        .expect("Invalid regex");

        Self { pattern }
    }
}

impl Default for Pep440 {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionScheme for Pep440 {
    fn name(&self) -> &'static str {
        "pep440"
    }

    fn parse(&self, input: &str) -> Result<Version> {
        let trimmed = input.trim();
        let trimmed = trimmed
            .strip_prefix(['v', 'V'])
            .unwrap_or(trimmed);

        let caps = self
            .pattern
            .captures(trimmed)
            .ok_or_else(|| VersionError::parse(input, self.name()))?;

        let epoch = caps
            .name("epoch")
            .map(|m| m.as_str().parse::<u64>())
            .transpose()
            .map_err(|_| VersionError::parse(input, self.name()))?
            .unwrap_or(0);

        let release = caps["release"]
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| VersionError::parse(input, self.name()))
            })
            .collect::<Result<Vec<u64>>>()?;

        let prerelease = match caps.name("prelabel") {
            Some(label) => {
                let kind = PrereleaseKind::from_label(label.as_str())
                    .ok_or_else(|| VersionError::parse(input, self.name()))?;
                let ordinal = caps
                    .name("prenum")
                    .map(|m| m.as_str().parse::<u64>())
                    .transpose()
                    .map_err(|_| VersionError::parse(input, self.name()))?
                    .unwrap_or(0);
                Some((kind, ordinal))
            }
            None => None,
        };

        // A dev marker without a number means dev0
        let devrelease = match caps.name("devmarker") {
            Some(_) => Some(
                caps.name("devnum")
                    .map(|m| m.as_str().parse::<u64>())
                    .transpose()
                    .map_err(|_| VersionError::parse(input, self.name()))?
                    .unwrap_or(0),
            ),
            None => None,
        };

        let local = caps.name("local").map(|m| m.as_str().to_string());

        Ok(Version {
            epoch,
            release,
            prerelease,
            devrelease,
            local,
        })
    }

    fn render(&self, version: &Version) -> String {
        let mut out = String::new();

        if version.epoch > 0 {
            out.push_str(&format!("{}!", version.epoch));
        }

        let release: Vec<String> = version.release.iter().map(u64::to_string).collect();
        out.push_str(&release.join("."));

        if let Some((kind, ordinal)) = version.prerelease {
            let label = match kind {
                PrereleaseKind::Alpha => "a",
                PrereleaseKind::Beta => "b",
                PrereleaseKind::Rc => "rc",
            };
            out.push_str(&format!("{label}{ordinal}"));
        }

        if let Some(dev) = version.devrelease {
            out.push_str(&format!(".dev{dev}"));
        }

        if let Some(local) = &version.local {
            out.push_str(&format!("+{local}"));
        }

        out
    }
}
