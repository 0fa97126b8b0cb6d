//! ratchet-core - Shared types for the ratchet release tool
//!
//! This crate provides the error taxonomy and configuration layer used by
//! the version engine, the changelog engine and the CLI.

pub mod config;
pub mod error;

pub use config::Config;
pub use error::{ChangelogError, ConfigError, RatchetError, Result, VersionError};
