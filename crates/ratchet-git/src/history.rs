//! Commit and tag history, materialized newest-first

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, info, instrument};

use crate::error::{GitError, Result};
use crate::records::{CommitRecord, TagRecord};
use crate::repository::Repo;

impl Repo {
    /// Get all commits on the current branch, newest first
    pub fn commits(&self) -> Result<Vec<CommitRecord>> {
        self.walk(None)
    }

    /// Get commits after the given revision (exclusive), newest first
    pub fn commits_since(&self, since: &str) -> Result<Vec<CommitRecord>> {
        let since_oid = self.repo.revparse_single(since)?.id();
        self.walk(Some(since_oid))
    }

    /// Get commits after a tag, newest first
    pub fn commits_since_tag(&self, tag_name: &str) -> Result<Vec<CommitRecord>> {
        let reference = self.repo.find_reference(&format!("refs/tags/{tag_name}"))?;
        let target = reference.peel_to_commit()?;
        self.walk(Some(target.id()))
    }

    fn walk(&self, hide: Option<Oid>) -> Result<Vec<CommitRecord>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(oid) = hide {
            revwalk.hide(oid)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_record(&commit));
        }

        debug!(count = commits.len(), "walked commit history");
        Ok(commits)
    }

    /// Get all tags, newest first by history reachability.
    ///
    /// Tags whose target is not reachable from HEAD sort last, in name
    /// order.
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagRecord>> {
        let mut tags: Vec<TagRecord> = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            // Annotated tags point at a tag object; peel either way to
            // the tagged commit.
            if let Ok(object) = self.repo.find_object(oid, None) {
                if let Ok(commit) = object.peel_to_commit() {
                    let date = Utc
                        .timestamp_opt(commit.time().seconds(), 0)
                        .single();
                    let mut record = TagRecord::new(&name, commit.id().to_string());
                    if let Some(date) = date {
                        record = record.with_date(date);
                    }
                    tags.push(record);
                }
            }

            true
        })?;

        // Order by position in the history walk from HEAD.
        let mut position: HashMap<String, usize> = HashMap::new();
        if let Ok(head) = self.head_commit() {
            let mut revwalk = self.repo.revwalk()?;
            revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
            revwalk.push(head.id())?;
            for (index, oid) in revwalk.enumerate() {
                position.insert(oid?.to_string(), index);
            }
        }

        tags.sort_by(|a, b| {
            let pa = position.get(&a.revision).copied().unwrap_or(usize::MAX);
            let pb = position.get(&b.revision).copied().unwrap_or(usize::MAX);
            pa.cmp(&pb).then_with(|| a.name.cmp(&b.name))
        });

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    /// Create a lightweight tag on HEAD
    #[instrument(skip(self), fields(name))]
    pub fn create_tag(&self, name: &str) -> Result<TagRecord> {
        if self
            .repo
            .find_reference(&format!("refs/tags/{name}"))
            .is_ok()
        {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;
        self.repo.tag_lightweight(name, head.as_object(), false)?;

        info!(name, "created tag");
        Ok(TagRecord::new(name, head.id().to_string()))
    }
}

/// Convert a git2 commit to a CommitRecord
fn commit_to_record(commit: &git2::Commit<'_>) -> CommitRecord {
    let author = commit.author();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    CommitRecord::new(
        commit.id().to_string(),
        commit.summary().unwrap_or("(no message)"),
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
    .with_body(commit.body().unwrap_or_default())
}
