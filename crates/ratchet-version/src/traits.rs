//! Version scheme trait

use ratchet_core::error::VersionError;

use crate::types::Version;

/// Result type for version operations
pub type Result<T> = std::result::Result<T, VersionError>;

/// A version dialect: how version strings are parsed and rendered.
///
/// Bump semantics live on [`Version`] and are shared by every scheme.
pub trait VersionScheme: Send + Sync {
    /// Get the name of this scheme
    fn name(&self) -> &'static str;

    /// Parse a version string into a [`Version`]
    fn parse(&self, input: &str) -> Result<Version>;

    /// Render a [`Version`] into this scheme's canonical string form
    fn render(&self, version: &Version) -> String;

    /// Check if a version string is valid for this scheme
    fn is_valid(&self, input: &str) -> bool {
        self.parse(input).is_ok()
    }
}
