//! ratchet-git - Git history access for the ratchet release tool
//!
//! Supplies normalized commit and tag records, materialized newest-first
//! in one blocking pass before the pure core runs.

mod error;
mod history;
mod records;
mod repository;

pub use error::{GitError, Result};
pub use records::{CommitRecord, TagRecord};
pub use repository::Repo;
