//! The version increment state machine.
//!
//! Bump semantics are scheme-independent; PEP440 and SemVer dialects
//! differ only in how the resulting value is parsed and rendered.

use tracing::debug;

use crate::types::{Increment, PrereleaseKind, Version};

/// Directives for a single bump
#[derive(Debug, Clone, Default)]
pub struct BumpSpec {
    /// Release increment to apply
    pub increment: Increment,
    /// Requested prerelease kind; absent finalizes a prerelease
    pub prerelease: Option<PrereleaseKind>,
    /// Ordinal a fresh prerelease starts at
    pub prerelease_offset: u64,
    /// Devrelease number, appended verbatim when given
    pub devrelease: Option<u64>,
    /// Bump the nested local segment instead of the public version
    pub local: bool,
}

impl BumpSpec {
    /// A plain release bump
    pub fn increment(increment: Increment) -> Self {
        Self {
            increment,
            ..Self::default()
        }
    }

    /// Request a prerelease of the given kind
    pub fn with_prerelease(mut self, kind: PrereleaseKind) -> Self {
        self.prerelease = Some(kind);
        self
    }

    /// Set the starting ordinal for a fresh prerelease
    pub fn with_prerelease_offset(mut self, offset: u64) -> Self {
        self.prerelease_offset = offset;
        self
    }

    /// Attach a devrelease number
    pub fn with_devrelease(mut self, dev: u64) -> Self {
        self.devrelease = Some(dev);
        self
    }

    /// Target the local segment
    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }
}

impl Version {
    /// Compute the next version from a set of bump directives.
    ///
    /// A prerelease request against a prerelease of the same kind advances
    /// the ordinal by one; against a lower-precedence kind it never
    /// regresses. Omitting the prerelease request while the current
    /// version is a prerelease finalizes it without touching the release
    /// tuple, so entering and leaving a prerelease costs exactly one
    /// release increment in total.
    pub fn bump(&self, spec: &BumpSpec) -> Version {
        if spec.local && self.local.is_some() {
            return self.bump_local(spec.increment);
        }

        // A prerelease already consumed its release increment when the
        // prerelease was first entered.
        let release = if self.is_prerelease() {
            self.release.clone()
        } else {
            bumped_release(&self.release, spec.increment)
        };

        let prerelease = match spec.prerelease {
            Some(requested) => Some(next_prerelease(
                self.prerelease,
                requested,
                spec.prerelease_offset,
            )),
            None => None,
        };

        let next = Version {
            epoch: self.epoch,
            release,
            prerelease,
            devrelease: spec.devrelease,
            local: None,
        };
        debug!(increment = %spec.increment, prerelease = ?spec.prerelease, "bumped version");
        next
    }

    /// Bump only the nested local segment; the public part is unchanged.
    ///
    /// Numeric dot-segments of the local part form its own release tuple;
    /// non-numeric segments are preserved in place. A local part with no
    /// numeric segment gains a ".1".
    fn bump_local(&self, increment: Increment) -> Version {
        let local = self.local.as_deref().unwrap_or_default();

        let segments: Vec<&str> = local.split('.').collect();
        let numeric: Vec<u64> = segments
            .iter()
            .filter_map(|s| s.parse::<u64>().ok())
            .collect();

        let new_local = if numeric.is_empty() {
            format!("{local}.1")
        } else {
            let bumped = bumped_release(&numeric, increment);
            let mut bumped = bumped.into_iter();
            let mut out: Vec<String> = segments
                .iter()
                .map(|s| {
                    if s.parse::<u64>().is_ok() {
                        bumped.next().map(|n| n.to_string()).unwrap_or_default()
                    } else {
                        (*s).to_string()
                    }
                })
                .collect();
            // The increment may have grown the numeric tuple
            out.extend(bumped.map(|n| n.to_string()));
            out.join(".")
        };

        let mut next = self.clone();
        next.local = Some(new_local);
        next
    }
}

/// Apply an increment to a release tuple: the targeted slot goes up by
/// one and everything after it resets to zero. Missing slots are treated
/// as zero.
fn bumped_release(release: &[u64], increment: Increment) -> Vec<u64> {
    let index = match increment {
        Increment::None => return release.to_vec(),
        Increment::Major => 0,
        Increment::Minor => 1,
        Increment::Patch => 2,
    };

    let mut parts = release.to_vec();
    if parts.len() <= index {
        parts.resize(index + 1, 0);
    }
    parts[index] += 1;
    for part in parts[index + 1..].iter_mut() {
        *part = 0;
    }
    parts
}

/// Linear, non-decreasing prerelease progression: alpha -> beta -> rc.
/// Staying on the effective kind advances the ordinal; moving up to a
/// new kind restarts at the offset.
fn next_prerelease(
    current: Option<(PrereleaseKind, u64)>,
    requested: PrereleaseKind,
    offset: u64,
) -> (PrereleaseKind, u64) {
    match current {
        Some((kind, ordinal)) => {
            let effective = requested.max(kind);
            if effective == kind {
                (kind, ordinal + 1)
            } else {
                (effective, offset)
            }
        }
        None => (requested, offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(release: &[u64]) -> Version {
        Version::new(release.to_vec())
    }

    #[test]
    fn test_major_zeroes_minor_and_patch() {
        let next = v(&[1, 2, 3]).bump(&BumpSpec::increment(Increment::Major));
        assert_eq!(next.release, vec![2, 0, 0]);
    }

    #[test]
    fn test_minor_zeroes_patch() {
        let next = v(&[1, 2, 3]).bump(&BumpSpec::increment(Increment::Minor));
        assert_eq!(next.release, vec![1, 3, 0]);
    }

    #[test]
    fn test_patch_increments_patch() {
        let next = v(&[1, 2, 3]).bump(&BumpSpec::increment(Increment::Patch));
        assert_eq!(next.release, vec![1, 2, 4]);
    }

    #[test]
    fn test_none_leaves_release_unchanged() {
        let next = v(&[1, 2, 3]).bump(&BumpSpec::default());
        assert_eq!(next.release, vec![1, 2, 3]);
    }

    #[test]
    fn test_short_release_tuple_grows_as_needed() {
        let next = v(&[1, 2]).bump(&BumpSpec::increment(Increment::Patch));
        assert_eq!(next.release, vec![1, 2, 1]);
    }

    #[test]
    fn test_every_increment_strictly_grows() {
        for increment in [Increment::Patch, Increment::Minor, Increment::Major] {
            let current = v(&[0, 4, 2]);
            let next = current.bump(&BumpSpec::increment(increment));
            assert!(next > current, "{increment} did not grow the version");
        }
    }

    #[test]
    fn test_fresh_prerelease_starts_at_offset() {
        let next = v(&[1, 0, 0]).bump(
            &BumpSpec::increment(Increment::Minor).with_prerelease(PrereleaseKind::Alpha),
        );
        assert_eq!(next.release, vec![1, 1, 0]);
        assert_eq!(next.prerelease, Some((PrereleaseKind::Alpha, 0)));

        let offset = v(&[1, 0, 0]).bump(
            &BumpSpec::increment(Increment::Minor)
                .with_prerelease(PrereleaseKind::Alpha)
                .with_prerelease_offset(1),
        );
        assert_eq!(offset.prerelease, Some((PrereleaseKind::Alpha, 1)));
    }

    #[test]
    fn test_same_kind_prerelease_advances_ordinal() {
        let mut current = v(&[1, 0, 0]).bump(
            &BumpSpec::increment(Increment::Patch).with_prerelease(PrereleaseKind::Beta),
        );
        assert_eq!(current.prerelease, Some((PrereleaseKind::Beta, 0)));

        for expected in 1..=3 {
            current = current.bump(&BumpSpec::default().with_prerelease(PrereleaseKind::Beta));
            assert_eq!(current.prerelease, Some((PrereleaseKind::Beta, expected)));
            assert_eq!(current.release, vec![1, 0, 1]);
        }
    }

    #[test]
    fn test_prerelease_kind_never_regresses() {
        let rc = v(&[1, 0, 0]).with_prerelease(PrereleaseKind::Rc, 2);
        let next = rc.bump(&BumpSpec::default().with_prerelease(PrereleaseKind::Alpha));
        assert_eq!(next.prerelease, Some((PrereleaseKind::Rc, 3)));
    }

    #[test]
    fn test_prerelease_moves_up_restarting_at_offset() {
        let alpha = v(&[1, 0, 0]).with_prerelease(PrereleaseKind::Alpha, 4);
        let next = alpha.bump(&BumpSpec::default().with_prerelease(PrereleaseKind::Rc));
        assert_eq!(next.prerelease, Some((PrereleaseKind::Rc, 0)));
    }

    #[test]
    fn test_finalize_drops_prerelease_and_dev() {
        let pre = v(&[1, 0, 1])
            .with_prerelease(PrereleaseKind::Rc, 1)
            .with_devrelease(3);
        let next = pre.bump(&BumpSpec::increment(Increment::Patch));
        assert!(next.prerelease.is_none());
        assert!(next.devrelease.is_none());
        assert_eq!(next.release, vec![1, 0, 1]);
    }

    #[test]
    fn test_finalize_law() {
        // Entering and leaving a prerelease equals one plain bump.
        let base = v(&[0, 3, 7]);
        let via_prerelease = base
            .bump(&BumpSpec::increment(Increment::Patch).with_prerelease(PrereleaseKind::Alpha))
            .bump(&BumpSpec::increment(Increment::Patch));
        let direct = base.bump(&BumpSpec::increment(Increment::Patch));
        assert_eq!(via_prerelease, direct);
    }

    #[test]
    fn test_feature_release_under_pep440() {
        use crate::pep440::Pep440;
        use crate::traits::VersionScheme;

        // One feature commit against 0.1.0 lands on 0.2.0.
        let scheme = Pep440::new();
        let current = scheme.parse("0.1.0").unwrap();
        let next = current.bump(&BumpSpec::increment(Increment::Minor));
        assert_eq!(scheme.render(&next), "0.2.0");
    }

    #[test]
    fn test_devrelease_is_independent_and_verbatim() {
        let next = v(&[1, 0, 0]).bump(&BumpSpec::increment(Increment::Minor).with_devrelease(7));
        assert_eq!(next.devrelease, Some(7));
        assert_eq!(next.release, vec![1, 1, 0]);

        // Dev only affects ordering as a tie-break.
        let plain = v(&[1, 0, 0]).bump(&BumpSpec::increment(Increment::Minor));
        assert!(next < plain);
    }

    #[test]
    fn test_public_bump_clears_local() {
        let current = v(&[1, 0, 0]).with_local("ubuntu.20.4");
        let next = current.bump(&BumpSpec::increment(Increment::Patch));
        assert!(next.local.is_none());
    }

    #[test]
    fn test_local_bump_leaves_public_untouched() {
        let current = v(&[1, 0, 0]).with_local("ubuntu.20.4");
        let next = current.bump(&BumpSpec::increment(Increment::Patch).local());
        assert_eq!(next.release, vec![1, 0, 0]);
        assert_eq!(next.local.as_deref(), Some("ubuntu.20.4.1"));
    }

    #[test]
    fn test_local_bump_major_zeroes_following_numerics() {
        let current = v(&[1, 0, 0]).with_local("ubuntu.20.4");
        let next = current.bump(&BumpSpec::increment(Increment::Major).local());
        assert_eq!(next.local.as_deref(), Some("ubuntu.21.0"));
    }

    #[test]
    fn test_local_bump_without_numeric_segment_appends_one() {
        let current = v(&[1, 0, 0]).with_local("nightly");
        let next = current.bump(&BumpSpec::increment(Increment::Patch).local());
        assert_eq!(next.local.as_deref(), Some("nightly.1"));
    }
}
