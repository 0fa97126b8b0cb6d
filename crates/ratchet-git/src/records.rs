//! Normalized VCS records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized commit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Commit id (full hash)
    pub id: String,
    /// Commit title (first line of the message)
    pub title: String,
    /// Message body after the title, if any
    pub body: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
}

impl CommitRecord {
    /// Create a new commit record
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    /// Short id (first 7 characters)
    pub fn short_id(&self) -> &str {
        &self.id[..7.min(self.id.len())]
    }

    /// Full message, title and body joined
    pub fn full_message(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.title, body),
            None => self.title.clone(),
        }
    }
}

/// A normalized tag record. Multiple tags may share a revision; ordering
/// follows history reachability, not tag names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    /// Tag name
    pub name: String,
    /// Commit id the tag points at
    pub revision: String,
    /// Timestamp of the tagged commit
    pub date: Option<DateTime<Utc>>,
}

impl TagRecord {
    /// Create a new tag record
    pub fn new(name: impl Into<String>, revision: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            revision: revision.into(),
            date: None,
        }
    }

    /// Set the tag date
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_record_short_id() {
        let commit = CommitRecord::new(
            "abc1234567890",
            "feat: add feature",
            "Author",
            "author@example.com",
            Utc::now(),
        );
        assert_eq!(commit.short_id(), "abc1234");
    }

    #[test]
    fn test_full_message_joins_body() {
        let commit = CommitRecord::new("abc", "feat: x", "A", "a@example.com", Utc::now())
            .with_body("details\n\nBREAKING CHANGE: y");
        assert_eq!(
            commit.full_message(),
            "feat: x\n\ndetails\n\nBREAKING CHANGE: y"
        );
    }

    #[test]
    fn test_empty_body_stays_none() {
        let commit =
            CommitRecord::new("abc", "fix: y", "A", "a@example.com", Utc::now()).with_body("");
        assert!(commit.body.is_none());
    }
}
