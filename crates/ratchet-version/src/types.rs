//! Version value types

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Prerelease kind, ordered by increasing release-readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrereleaseKind {
    /// Alpha prerelease
    Alpha,
    /// Beta prerelease
    Beta,
    /// Release candidate
    Rc,
}

impl PrereleaseKind {
    /// Parse a prerelease label as written in version strings
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "a" | "alpha" => Some(Self::Alpha),
            "b" | "beta" => Some(Self::Beta),
            "c" | "rc" | "pre" | "preview" => Some(Self::Rc),
            _ => None,
        }
    }
}

impl std::fmt::Display for PrereleaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alpha => write!(f, "alpha"),
            Self::Beta => write!(f, "beta"),
            Self::Rc => write!(f, "rc"),
        }
    }
}

/// Parsed, totally ordered representation of a version.
///
/// The same value backs both the PEP440-like and SemVer-like dialects;
/// only parsing and rendering differ between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Version epoch (PEP440); 0 for the common case
    pub epoch: u64,
    /// Release tuple (major, minor, patch, ...)
    pub release: Vec<u64>,
    /// Prerelease kind and ordinal
    pub prerelease: Option<(PrereleaseKind, u64)>,
    /// Development release number; dev versions sort before their
    /// non-dev equivalent
    pub devrelease: Option<u64>,
    /// Opaque local segment (PEP440 local / SemVer build slot)
    pub local: Option<String>,
}

impl Version {
    /// Create a plain release version
    pub fn new(release: Vec<u64>) -> Self {
        Self {
            epoch: 0,
            release,
            prerelease: None,
            devrelease: None,
            local: None,
        }
    }

    /// The conventional starting point for a new project
    pub fn zero() -> Self {
        Self::new(vec![0, 0, 0])
    }

    /// Set the prerelease segment
    pub fn with_prerelease(mut self, kind: PrereleaseKind, ordinal: u64) -> Self {
        self.prerelease = Some((kind, ordinal));
        self
    }

    /// Set the devrelease segment
    pub fn with_devrelease(mut self, dev: u64) -> Self {
        self.devrelease = Some(dev);
        self
    }

    /// Set the local segment
    pub fn with_local(mut self, local: impl Into<String>) -> Self {
        self.local = Some(local.into());
        self
    }

    /// Major component (first release slot, 0 when absent)
    pub fn major(&self) -> u64 {
        self.release.first().copied().unwrap_or(0)
    }

    /// Minor component
    pub fn minor(&self) -> u64 {
        self.release.get(1).copied().unwrap_or(0)
    }

    /// Patch component
    pub fn patch(&self) -> u64 {
        self.release.get(2).copied().unwrap_or(0)
    }

    /// Whether this version carries a prerelease segment
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// Ordering key for the prerelease slot: final > rc > beta > alpha,
    /// ordinal breaking ties within a kind
    fn prerelease_key(&self) -> (u8, u64) {
        match self.prerelease {
            None => (3, 0),
            Some((kind, ordinal)) => (kind as u8, ordinal),
        }
    }

    /// Ordering key for the dev slot: dev sorts before non-dev
    fn dev_key(&self) -> (u8, u64) {
        match self.devrelease {
            Some(dev) => (0, dev),
            None => (1, 0),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| self.release.cmp(&other.release))
            .then_with(|| self.prerelease_key().cmp(&other.prerelease_key()))
            .then_with(|| self.dev_key().cmp(&other.dev_key()))
            .then_with(|| self.local.cmp(&other.local))
    }
}

/// Increment kind, totally ordered so aggregation over a commit set is
/// a plain maximum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Increment {
    /// No release-worthy change
    #[default]
    None,
    /// Bug-fix level change
    Patch,
    /// Backwards-compatible feature
    Minor,
    /// Breaking change
    Major,
}

impl Increment {
    /// Parse a config-supplied increment name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "major" => Some(Self::Major),
            "minor" => Some(Self::Minor),
            "patch" => Some(Self::Patch),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl std::fmt::Display for Increment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Patch => write!(f, "patch"),
            Self::Minor => write!(f, "minor"),
            Self::Major => write!(f, "major"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_tuples_compare_lexicographically() {
        assert!(Version::new(vec![1, 0, 0]) < Version::new(vec![1, 0, 1]));
        assert!(Version::new(vec![1, 9, 0]) < Version::new(vec![1, 10, 0]));
        assert!(Version::new(vec![1, 1]) < Version::new(vec![1, 1, 0]));
    }

    #[test]
    fn test_prerelease_ordering_within_release() {
        let release = Version::new(vec![1, 0, 0]);
        let alpha = Version::new(vec![1, 0, 0]).with_prerelease(PrereleaseKind::Alpha, 1);
        let beta = Version::new(vec![1, 0, 0]).with_prerelease(PrereleaseKind::Beta, 0);
        let rc = Version::new(vec![1, 0, 0]).with_prerelease(PrereleaseKind::Rc, 0);

        assert!(alpha < beta);
        assert!(beta < rc);
        assert!(rc < release);
    }

    #[test]
    fn test_prerelease_ordinal_breaks_ties() {
        let a0 = Version::new(vec![1, 0, 0]).with_prerelease(PrereleaseKind::Alpha, 0);
        let a1 = Version::new(vec![1, 0, 0]).with_prerelease(PrereleaseKind::Alpha, 1);
        assert!(a0 < a1);
    }

    #[test]
    fn test_dev_sorts_before_non_dev() {
        let dev = Version::new(vec![1, 0, 0]).with_devrelease(1);
        let plain = Version::new(vec![1, 0, 0]);
        assert!(dev < plain);

        let pre_dev = Version::new(vec![1, 0, 0])
            .with_prerelease(PrereleaseKind::Alpha, 0)
            .with_devrelease(0);
        let pre = Version::new(vec![1, 0, 0]).with_prerelease(PrereleaseKind::Alpha, 0);
        assert!(pre_dev < pre);
    }

    #[test]
    fn test_epoch_dominates() {
        let old = Version::new(vec![2024, 1]);
        let mut reset = Version::new(vec![1, 0, 0]);
        reset.epoch = 1;
        assert!(old < reset);
    }

    #[test]
    fn test_local_sorts_after_public() {
        let public = Version::new(vec![1, 0, 0]);
        let local = Version::new(vec![1, 0, 0]).with_local("ubuntu.1");
        assert!(public < local);
    }

    #[test]
    fn test_increment_ordering_and_max() {
        assert!(Increment::None < Increment::Patch);
        assert!(Increment::Patch < Increment::Minor);
        assert!(Increment::Minor < Increment::Major);
        assert_eq!(Increment::Patch.max(Increment::Minor), Increment::Minor);
    }

    #[test]
    fn test_increment_from_name() {
        assert_eq!(Increment::from_name("MAJOR"), Some(Increment::Major));
        assert_eq!(Increment::from_name("patch"), Some(Increment::Patch));
        assert_eq!(Increment::from_name("huge"), None);
    }
}
