//! Changelog tree building
//!
//! Groups a newest-first commit walk into per-release buckets keyed by
//! tag, sub-grouped by change type. One forward pass with an explicit
//! accumulator; the output is newest-first, matching how the merge
//! engine inserts new content above old.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use ratchet_git::{CommitRecord, TagRecord};
use ratchet_version::{TagTemplate, Version, VersionScheme};

use crate::classifier::Classifier;
use crate::types::{ChangeEntry, ReleaseBucket, TypeSection};

/// Label state for the bucket being accumulated
#[derive(Debug, Clone)]
struct BucketLabel {
    label: String,
    tag: Option<String>,
    date: Option<NaiveDate>,
}

/// Builds the release-grouped, type-grouped change tree
pub struct TreeBuilder {
    classifier: Classifier,
    scheme: Arc<dyn VersionScheme>,
    template: TagTemplate,
    unreleased_label: String,
    release_hint: Option<(String, NaiveDate)>,
    merge_prereleases: bool,
}

impl TreeBuilder {
    /// Create a builder with the default unreleased label
    pub fn new(
        classifier: Classifier,
        scheme: Arc<dyn VersionScheme>,
        template: TagTemplate,
    ) -> Self {
        Self {
            classifier,
            scheme,
            template,
            unreleased_label: "Unreleased".to_string(),
            release_hint: None,
            merge_prereleases: false,
        }
    }

    /// Override the unreleased label
    pub fn with_unreleased_label(mut self, label: impl Into<String>) -> Self {
        self.unreleased_label = label.into();
        self
    }

    /// Label not-yet-tagged changes with an upcoming version and date,
    /// for dry-run previews
    pub fn with_release_hint(mut self, version: impl Into<String>, date: NaiveDate) -> Self {
        self.release_hint = Some((version.into(), date));
        self
    }

    /// Fold prerelease tags into the next full release's bucket instead
    /// of giving them their own
    pub fn with_merged_prereleases(mut self, merge: bool) -> Self {
        self.merge_prereleases = merge;
        self
    }

    /// Build the tree from a newest-first commit walk and the tag list
    #[instrument(skip(self, commits, tags), fields(commit_count = commits.len(), tag_count = tags.len()))]
    pub fn build(&self, commits: &[CommitRecord], tags: &[TagRecord]) -> Vec<ReleaseBucket> {
        let mut tags_by_revision: HashMap<&str, Vec<&TagRecord>> = HashMap::new();
        for tag in tags {
            tags_by_revision.entry(tag.revision.as_str()).or_default().push(tag);
        }

        let mut used: HashSet<&str> = HashSet::new();
        let mut buckets = Vec::new();
        let mut accumulator: HashMap<String, Vec<ChangeEntry>> = HashMap::new();

        // The newest commit's tag, if eligible, names the first bucket;
        // otherwise everything up to the first boundary is unreleased.
        let mut current = commits
            .first()
            .and_then(|commit| self.eligible_tag(commit, &tags_by_revision, &used))
            .map(|(tag, version)| self.tag_label(tag, &version))
            .unwrap_or_else(|| self.unreleased());

        for commit in commits {
            if let Some((tag, version)) = self.eligible_tag(commit, &tags_by_revision, &used) {
                used.insert(tag.name.as_str());
                if !accumulator.is_empty() {
                    let bucket = self.flush(&current, &mut accumulator);
                    if !bucket.is_empty() {
                        buckets.push(bucket);
                    }
                }
                current = self.tag_label(tag, &version);
            }

            self.classify_commit(commit, &mut accumulator);
        }

        if !accumulator.is_empty() {
            let bucket = self.flush(&current, &mut accumulator);
            if !bucket.is_empty() {
                buckets.push(bucket);
            }
        }

        debug!(bucket_count = buckets.len(), "built changelog tree");
        buckets
    }

    /// A tag marks a release boundary when it parses under the active
    /// scheme and template, has not been consumed yet, and (in merged
    /// prerelease mode) is not itself a prerelease.
    fn eligible_tag<'t>(
        &self,
        commit: &CommitRecord,
        tags_by_revision: &HashMap<&str, Vec<&'t TagRecord>>,
        used: &HashSet<&str>,
    ) -> Option<(&'t TagRecord, Version)> {
        let candidates = tags_by_revision.get(commit.id.as_str())?;
        candidates.iter().find_map(|tag| {
            if used.contains(tag.name.as_str()) {
                return None;
            }
            let version = self.template.extract(&tag.name, self.scheme.as_ref())?;
            if self.merge_prereleases && version.is_prerelease() {
                return None;
            }
            Some((*tag, version))
        })
    }

    fn tag_label(&self, tag: &TagRecord, version: &Version) -> BucketLabel {
        BucketLabel {
            label: self.scheme.render(version),
            tag: Some(tag.name.clone()),
            date: tag.date.map(|d| d.date_naive()),
        }
    }

    fn unreleased(&self) -> BucketLabel {
        match &self.release_hint {
            Some((version, date)) => BucketLabel {
                label: version.clone(),
                tag: None,
                date: Some(*date),
            },
            None => BucketLabel {
                label: self.unreleased_label.clone(),
                tag: None,
                date: None,
            },
        }
    }

    /// Classify the commit title and every blank-line-delimited body
    /// paragraph, so footer notices and nested conventional paragraphs
    /// land in their own sections
    fn classify_commit(&self, commit: &CommitRecord, accumulator: &mut HashMap<String, Vec<ChangeEntry>>) {
        if let Some(classified) = self.classifier.classify(&commit.full_message()) {
            accumulator
                .entry(classified.change_type.clone())
                .or_default()
                .push(ChangeEntry {
                    scope: classified.scope,
                    breaking: classified.breaking,
                    message: classified.message,
                });
        }

        if let Some(body) = &commit.body {
            for paragraph in body.split("\n\n") {
                let Some(first_line) = paragraph.lines().next() else {
                    continue;
                };
                if let Some(classified) = self.classifier.classify(first_line) {
                    accumulator
                        .entry(classified.change_type.clone())
                        .or_default()
                        .push(ChangeEntry {
                            scope: classified.scope,
                            breaking: classified.breaking,
                            message: classified.message,
                        });
                }
            }
        }
    }

    /// Drain the accumulator into a bucket, with sections in the
    /// configured display order and hidden types dropped
    fn flush(
        &self,
        label: &BucketLabel,
        accumulator: &mut HashMap<String, Vec<ChangeEntry>>,
    ) -> ReleaseBucket {
        let mut bucket = ReleaseBucket {
            label: label.label.clone(),
            tag: label.tag.clone(),
            date: label.date,
            sections: Vec::new(),
        };

        for spec in &self.classifier.settings().types {
            if spec.hidden {
                accumulator.remove(&spec.key);
                continue;
            }
            if let Some(entries) = accumulator.remove(&spec.key) {
                bucket.add_section(TypeSection {
                    change_type: spec.key.clone(),
                    title: spec.section.clone(),
                    entries,
                });
            }
        }
        accumulator.clear();

        bucket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use ratchet_core::config::ChangelogConfig;
    use ratchet_version::SchemeRegistry;

    use crate::classifier::ClassifierSettings;

    fn builder() -> TreeBuilder {
        let settings =
            ClassifierSettings::from_changelog_config(&ChangelogConfig::default(), false).unwrap();
        TreeBuilder::new(
            Classifier::new(settings).unwrap(),
            SchemeRegistry::new().resolve("pep440").unwrap(),
            TagTemplate::new("v$version").unwrap(),
        )
    }

    fn commit(id: &str, title: &str) -> CommitRecord {
        CommitRecord::new(id, title, "Test", "t@example.com", Utc::now())
    }

    fn tag(name: &str, revision: &str) -> TagRecord {
        TagRecord::new(name, revision).with_date(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_untagged_commits_are_unreleased() {
        let commits = vec![commit("c2", "feat: second"), commit("c1", "feat: first")];
        let buckets = builder().build(&commits, &[]);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Unreleased");
        assert!(buckets[0].tag.is_none());
        assert_eq!(buckets[0].sections[0].entries.len(), 2);
    }

    #[test]
    fn test_entries_preserve_newest_first_order() {
        let commits = vec![commit("c2", "feat: second"), commit("c1", "feat: first")];
        let buckets = builder().build(&commits, &[]);

        let entries = &buckets[0].sections[0].entries;
        assert_eq!(entries[0].message, "second");
        assert_eq!(entries[1].message, "first");
    }

    #[test]
    fn test_tag_boundary_flushes_accumulator() {
        let commits = vec![
            commit("c3", "fix: unreleased fix"),
            commit("c2", "feat: released feature"),
            commit("c1", "fix: released fix"),
        ];
        let tags = vec![tag("v0.2.0", "c2")];

        let buckets = builder().build(&commits, &tags);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Unreleased");
        assert_eq!(buckets[1].label, "0.2.0");
        assert_eq!(buckets[1].tag.as_deref(), Some("v0.2.0"));
        assert_eq!(buckets[1].date, Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));

        // The tagged commit itself belongs to the tagged release.
        let released: Vec<_> = buckets[1]
            .sections
            .iter()
            .flat_map(|s| &s.entries)
            .map(|e| e.message.as_str())
            .collect();
        assert!(released.contains(&"released feature"));
        assert!(released.contains(&"released fix"));
    }

    #[test]
    fn test_newest_commit_tagged_yields_no_unreleased_bucket() {
        let commits = vec![commit("c2", "feat: top"), commit("c1", "fix: below")];
        let tags = vec![tag("v1.0.0", "c2")];

        let buckets = builder().build(&commits, &tags);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "1.0.0");
    }

    #[test]
    fn test_ineligible_tags_are_ignored() {
        let commits = vec![commit("c2", "feat: second"), commit("c1", "feat: first")];
        let tags = vec![tag("nightly-build", "c1")];

        let buckets = builder().build(&commits, &tags);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Unreleased");
    }

    #[test]
    fn test_merged_prereleases_fold_into_next_full_release() {
        let commits = vec![
            commit("c3", "feat: final polish"),
            commit("c2", "feat: rc candidate"),
            commit("c1", "fix: early fix"),
        ];
        let tags = vec![tag("v1.0.0", "c3"), tag("v1.0.0rc1", "c2"), tag("v0.9.0", "c1")];

        let buckets = builder().with_merged_prereleases(true).build(&commits, &tags);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "1.0.0");
        assert_eq!(buckets[1].label, "0.9.0");

        // The rc commit rode along into 1.0.0.
        let first: Vec<_> = buckets[0]
            .sections
            .iter()
            .flat_map(|s| &s.entries)
            .map(|e| e.message.as_str())
            .collect();
        assert!(first.contains(&"rc candidate"));
    }

    #[test]
    fn test_prerelease_tags_keep_own_bucket_without_flag() {
        let commits = vec![
            commit("c2", "feat: final polish"),
            commit("c1", "feat: rc candidate"),
        ];
        let tags = vec![tag("v1.0.0", "c2"), tag("v1.0.0rc1", "c1")];

        let buckets = builder().build(&commits, &tags);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "1.0.0");
        assert_eq!(buckets[1].label, "1.0.0rc1");
    }

    #[test]
    fn test_breaking_footer_gets_own_entry() {
        let commits = vec![commit("c1", "feat: new engine")
            .with_body("Details.\n\nBREAKING CHANGE: old engine removed")];

        let buckets = builder().build(&commits, &[]);
        let bucket = &buckets[0];

        let breaking = bucket
            .sections
            .iter()
            .find(|s| s.change_type == "BREAKING CHANGE")
            .expect("breaking section");
        assert_eq!(breaking.entries[0].message, "old engine removed");

        let feat = bucket
            .sections
            .iter()
            .find(|s| s.change_type == "feat")
            .expect("feat section");
        assert!(feat.entries[0].breaking);
    }

    #[test]
    fn test_sections_follow_configured_order() {
        let commits = vec![
            commit("c3", "fix: a fix"),
            commit("c2", "feat: a feature"),
            commit("c1", "BREAKING CHANGE: the world changed"),
        ];

        let buckets = builder().build(&commits, &[]);
        let order: Vec<_> = buckets[0]
            .sections
            .iter()
            .map(|s| s.change_type.as_str())
            .collect();

        assert_eq!(order, vec!["BREAKING CHANGE", "feat", "fix"]);
    }

    #[test]
    fn test_hidden_types_are_dropped() {
        let commits = vec![commit("c2", "docs: readme"), commit("c1", "fix: real fix")];

        let buckets = builder().build(&commits, &[]);
        let types: Vec<_> = buckets[0]
            .sections
            .iter()
            .map(|s| s.change_type.as_str())
            .collect();

        assert_eq!(types, vec!["fix"]);
    }

    #[test]
    fn test_release_hint_labels_unreleased_bucket() {
        let commits = vec![commit("c1", "feat: pending")];
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let buckets = builder().with_release_hint("0.2.0", date).build(&commits, &[]);

        assert_eq!(buckets[0].label, "0.2.0");
        assert_eq!(buckets[0].date, Some(date));
    }

    #[test]
    fn test_release_with_only_hidden_changes_is_dropped() {
        let commits = vec![
            commit("c2", "feat: newer work"),
            commit("c1", "docs: readme only"),
        ];
        let tags = vec![tag("v0.1.0", "c1")];

        let buckets = builder().build(&commits, &tags);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Unreleased");
    }

    #[test]
    fn test_release_with_only_unrecognized_commits_is_dropped() {
        let commits = vec![
            commit("c2", "feat: newer work"),
            commit("c1", "chore: cleanup"),
        ];
        let tags = vec![tag("v0.1.0", "c1")];

        let buckets = builder().build(&commits, &tags);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "Unreleased");
    }
}
