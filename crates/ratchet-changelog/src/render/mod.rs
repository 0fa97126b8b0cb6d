//! Changelog rendering
//!
//! The renderer is the injectable seam between the bucket tree and the
//! merge engine: it receives the tree and returns an opaque text block.

mod markdown;

pub use markdown::MarkdownRenderer;

use crate::types::ReleaseBucket;

/// Trait for changelog renderers
pub trait ChangelogRenderer: Send + Sync {
    /// Render the bucket tree into the text block to merge
    fn render(&self, buckets: &[ReleaseBucket]) -> String;

    /// File extension this renderer produces
    fn extension(&self) -> &'static str;
}
