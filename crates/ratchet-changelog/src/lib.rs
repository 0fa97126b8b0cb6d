//! ratchet-changelog - Commit classification and the changelog engine
//!
//! Classifies conventional-commit messages, groups them into per-release
//! buckets, parses existing changelog documents across markup dialects
//! and splices freshly rendered content into them without losing
//! hand-written material.

pub mod classifier;
pub mod format;
pub mod merge;
pub mod render;
pub mod tree;
pub mod types;

pub use classifier::{Classified, Classifier, ClassifierSettings, TypeSpec, BREAKING_CHANGE};
pub use format::{dialect_by_name, guess_dialect, Dialect};
pub use merge::merge;
pub use render::{ChangelogRenderer, MarkdownRenderer};
pub use tree::TreeBuilder;
pub use types::{ChangeEntry, ChangelogMetadata, ReleaseBucket, TypeSection};
