//! ratchet-version - Version schemes and the bump engine
//!
//! This crate provides the parsed version value, the scheme-parametric
//! increment state machine, the PEP440-like and SemVer-like dialects and
//! the tag-name template.

mod bump;
mod pep440;
mod registry;
mod semver;
mod tag;
mod traits;
pub mod types;

pub use bump::BumpSpec;
pub use pep440::Pep440;
pub use registry::SchemeRegistry;
pub use semver::SemVer;
pub use tag::TagTemplate;
pub use traits::VersionScheme;
pub use types::{Increment, PrereleaseKind, Version};
