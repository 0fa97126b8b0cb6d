//! SemVer-like version scheme
//!
//! Raw parsing is delegated to the `semver` crate; the prerelease
//! identifiers are then mapped onto the shared version value. The build
//! slot carries the local segment but never participates in ordering
//! (SemVer rule). Epochs are not representable in this dialect.

use regex::Regex;

use ratchet_core::error::VersionError;

use crate::traits::{Result, VersionScheme};
use crate::types::{PrereleaseKind, Version};

/// SemVer-like version dialect
pub struct SemVer {
    identifier: Regex,
}

impl SemVer {
    /// Create the scheme with its compiled identifier grammar
    pub fn new() -> Self {
        let identifier = Regex::new(r"^(?P<label>[a-zA-Z]+)(?P<num>\d+)?$").expect("Invalid regex");
        Self { identifier }
    }

    /// Map the dash-separated prerelease identifiers onto prerelease and
    /// devrelease slots. Accepted shapes: `alpha`, `alpha.1`, `alpha1`,
    /// `rc.2.dev.3`, `dev.1`.
    fn parse_pre(
        &self,
        input: &str,
        pre: &str,
    ) -> Result<(Option<(PrereleaseKind, u64)>, Option<u64>)> {
        let mut prerelease = None;
        let mut devrelease = None;

        let tokens: Vec<&str> = pre.split('.').collect();
        let mut index = 0;

        while index < tokens.len() {
            let caps = self
                .identifier
                .captures(tokens[index])
                .ok_or_else(|| VersionError::parse(input, self.name()))?;
            let label = caps.name("label").map(|m| m.as_str()).unwrap_or_default();
            let attached = caps
                .name("num")
                .map(|m| m.as_str().parse::<u64>())
                .transpose()
                .map_err(|_| VersionError::parse(input, self.name()))?;
            index += 1;

            // A bare label takes its number from the next dotted token
            let number = match attached {
                Some(n) => Some(n),
                None => match tokens.get(index).and_then(|t| t.parse::<u64>().ok()) {
                    Some(n) => {
                        index += 1;
                        Some(n)
                    }
                    None => None,
                },
            };

            if label.eq_ignore_ascii_case("dev") {
                if devrelease.is_some() {
                    return Err(VersionError::parse(input, self.name()));
                }
                devrelease = Some(number.unwrap_or(0));
            } else {
                let kind = PrereleaseKind::from_label(label)
                    .ok_or_else(|| VersionError::parse(input, self.name()))?;
                if prerelease.is_some() || devrelease.is_some() {
                    return Err(VersionError::parse(input, self.name()));
                }
                prerelease = Some((kind, number.unwrap_or(0)));
            }
        }

        Ok((prerelease, devrelease))
    }
}

impl Default for SemVer {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionScheme for SemVer {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn parse(&self, input: &str) -> Result<Version> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        let parsed = semver::Version::parse(trimmed)
            .map_err(|_| VersionError::parse(input, self.name()))?;

        let (prerelease, devrelease) = if parsed.pre.is_empty() {
            (None, None)
        } else {
            self.parse_pre(input, parsed.pre.as_str())?
        };

        Ok(Version {
            epoch: 0,
            release: vec![parsed.major, parsed.minor, parsed.patch],
            prerelease,
            devrelease,
            local: if parsed.build.is_empty() {
                None
            } else {
                Some(parsed.build.to_string())
            },
        })
    }

    fn render(&self, version: &Version) -> String {
        let mut out = format!(
            "{}.{}.{}",
            version.major(),
            version.minor(),
            version.patch()
        );

        let mut pre_parts: Vec<String> = Vec::new();
        if let Some((kind, ordinal)) = version.prerelease {
            pre_parts.push(format!("{kind}.{ordinal}"));
        }
        if let Some(dev) = version.devrelease {
            pre_parts.push(format!("dev.{dev}"));
        }
        if !pre_parts.is_empty() {
            out.push('-');
            out.push_str(&pre_parts.join("."));
        }

        if let Some(local) = &version.local {
            out.push('+');
            out.push_str(local);
        }

        out
    }
}
