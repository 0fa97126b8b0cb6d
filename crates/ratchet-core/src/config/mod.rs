//! Configuration loading, validation and types

mod defaults;
mod loader;
mod types;
mod validation;

pub use defaults::{config_file_names, default_change_types, default_type_order};
pub use loader::{find_config, load_config, load_config_from_dir, load_config_or_default};
pub use types::{ChangeTypeConfig, ChangelogConfig, Config, VersionConfig};
pub use validation::validate_config;
