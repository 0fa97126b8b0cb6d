//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find a configuration file in a directory or its parents.
///
/// At each level the candidate names from [`config_file_names`] are
/// checked in order; the first match wins. Parents are walked until the
/// filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let candidate = current.join(name);
            if candidate.exists() {
                info!(path = %candidate.display(), "found config file");
                return Some(candidate);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration from a directory (searching parent directories)
pub fn load_config_from_dir(dir: &Path) -> Result<(Config, PathBuf)> {
    let config_path = find_config(dir).ok_or_else(|| ConfigError::NotFound(dir.to_path_buf()))?;

    let config = load_config(&config_path)?;
    Ok((config, config_path))
}

/// Load configuration or fall back to defaults.
///
/// Note: a config file that exists but fails to parse or validate is a
/// hard error, not a fallback case.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config file found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("ratchet.toml");
        std::fs::write(&config_path, "[version]\nscheme = \"semver\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_walks_parents() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("ratchet.toml");
        std::fs::write(&config_path, "[version]\nscheme = \"pep440\"").unwrap();

        let subdir = temp.path().join("deep").join("nested");
        std::fs::create_dir_all(&subdir).unwrap();

        let found = find_config(&subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("ratchet.toml");
        let yaml_path = temp.path().join("ratchet.yaml");
        std::fs::write(&toml_path, "[version]\nscheme = \"semver\"").unwrap();
        std::fs::write(&yaml_path, "version:\n  scheme: pep440").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("ratchet.toml");
        std::fs::write(
            &config_path,
            "[version]\nscheme = \"semver\"\nmajor_version_zero = true\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.version.scheme, "semver");
        assert!(config.version.major_version_zero);
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("ratchet.yaml");
        std::fs::write(
            &config_path,
            "version:\n  scheme: semver\nchangelog:\n  merge_prereleases: true\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.version.scheme, "semver");
        assert!(config.changelog.merge_prereleases);
    }

    #[test]
    fn test_invalid_config_is_an_error_not_a_fallback() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("ratchet.toml");
        std::fs::write(&config_path, "[version]\ntag_format = \"no-placeholder\"\n").unwrap();

        assert!(load_config_or_default(temp.path()).is_err());
    }

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.version.scheme, "pep440");
    }
}
