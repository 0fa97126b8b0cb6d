//! Exit codes for the CLI

#![allow(dead_code)]

use ratchet_core::error::RatchetError;
use ratchet_git::GitError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Changelog error
pub const CHANGELOG_ERROR: i32 = 5;

/// Map an error chain to an exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(ratchet_err) = err.downcast_ref::<RatchetError>() {
        return match ratchet_err {
            RatchetError::Config(_) => CONFIG_ERROR,
            RatchetError::Version(_) => VERSION_ERROR,
            RatchetError::Changelog(_) => CHANGELOG_ERROR,
            _ => ERROR,
        };
    }
    if err.downcast_ref::<ratchet_core::error::ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    if err.downcast_ref::<ratchet_core::error::VersionError>().is_some() {
        return VERSION_ERROR;
    }
    if err.downcast_ref::<ratchet_core::error::ChangelogError>().is_some() {
        return CHANGELOG_ERROR;
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    ERROR
}
