//! Default configuration values

use std::collections::HashMap;

use super::types::ChangeTypeConfig;

/// Configuration file names searched for, in priority order
pub fn config_file_names() -> &'static [&'static str] {
    &[
        "ratchet.toml",
        ".ratchet.toml",
        "ratchet.yaml",
        "ratchet.yml",
    ]
}

/// Default display order of change types in the changelog
pub fn default_type_order() -> Vec<String> {
    ["BREAKING CHANGE", "feat", "fix", "perf", "refactor"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Default change-type table: the conventional-commit vocabulary with
/// section headers and increment mappings
pub fn default_change_types() -> HashMap<String, ChangeTypeConfig> {
    let mut types = HashMap::new();
    types.insert(
        "BREAKING CHANGE".to_string(),
        ChangeTypeConfig::new("Breaking Changes").with_increment("major"),
    );
    types.insert(
        "feat".to_string(),
        ChangeTypeConfig::new("Features").with_increment("minor"),
    );
    types.insert(
        "fix".to_string(),
        ChangeTypeConfig::new("Bug Fixes").with_increment("patch"),
    );
    types.insert(
        "perf".to_string(),
        ChangeTypeConfig::new("Performance").with_increment("patch"),
    );
    types.insert(
        "refactor".to_string(),
        ChangeTypeConfig::new("Refactoring").with_increment("patch"),
    );
    types.insert(
        "docs".to_string(),
        ChangeTypeConfig::new("Documentation").hidden(),
    );
    types.insert("style".to_string(), ChangeTypeConfig::new("Styles").hidden());
    types.insert("test".to_string(), ChangeTypeConfig::new("Tests").hidden());
    types.insert(
        "build".to_string(),
        ChangeTypeConfig::new("Build System").hidden(),
    );
    types.insert(
        "ci".to_string(),
        ChangeTypeConfig::new("Continuous Integration").hidden(),
    );
    types
}
