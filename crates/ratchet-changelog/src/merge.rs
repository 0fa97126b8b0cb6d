//! Incremental changelog merging
//!
//! Splices a freshly rendered block into an existing document using the
//! format parser's metadata. Everything outside the unreleased block is
//! preserved byte-for-byte, so hand-written annotations survive
//! repeated runs.

use std::ops::Range;

use tracing::debug;

use crate::types::ChangelogMetadata;

/// Merge a rendered block into the existing document lines.
///
/// The unreleased block is dropped and the new block lands directly
/// above the latest release title, separated by one blank line. Without
/// a latest release the block is appended at the end instead.
pub fn merge(new_block: &str, existing_lines: &[String], metadata: &ChangelogMetadata) -> Vec<String> {
    let removed: Option<Range<usize>> = match (metadata.unreleased_start, metadata.unreleased_end) {
        (Some(start), Some(end)) => Some(start..end.max(start)),
        (Some(start), None) => Some(start..existing_lines.len()),
        _ => None,
    };

    // A version title swallowed by the removed span cannot anchor the
    // insertion; the block falls through to the append path. This guards
    // document shapes where the unreleased section wraps or trails the
    // latest release title.
    let insert_at = metadata
        .latest_version_position
        .filter(|position| !removed.as_ref().is_some_and(|range| range.contains(position)));

    let block: Vec<&str> = new_block.trim_end().lines().collect();

    let mut output: Vec<String> = Vec::with_capacity(existing_lines.len() + block.len() + 1);
    let mut inserted = false;

    for (index, line) in existing_lines.iter().enumerate() {
        if removed.as_ref().is_some_and(|range| range.contains(&index)) {
            continue;
        }

        if insert_at == Some(index) {
            output.extend(block.iter().map(|l| l.to_string()));
            output.push(String::new());
            inserted = true;
        }

        output.push(line.clone());
    }

    if !inserted {
        if !output.is_empty() && !output.last().is_some_and(|l| l.trim().is_empty()) {
            output.push(String::new());
        }
        output.extend(block.iter().map(|l| l.to_string()));
    }

    debug!(
        existing = existing_lines.len(),
        merged = output.len(),
        inserted_above_latest = inserted,
        "merged changelog block"
    );
    output
}
