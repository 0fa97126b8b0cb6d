//! Scheme registry

use std::sync::Arc;

use tracing::debug;

use ratchet_core::error::VersionError;

use crate::pep440::Pep440;
use crate::semver::SemVer;
use crate::traits::{Result, VersionScheme};

/// Registry of available version schemes
pub struct SchemeRegistry {
    schemes: Vec<Arc<dyn VersionScheme>>,
}

impl SchemeRegistry {
    /// Create a new registry with all built-in schemes
    pub fn new() -> Self {
        Self {
            schemes: vec![Arc::new(Pep440::new()), Arc::new(SemVer::new())],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            schemes: Vec::new(),
        }
    }

    /// Register a scheme
    pub fn register<S: VersionScheme + 'static>(&mut self, scheme: S) {
        self.schemes.push(Arc::new(scheme));
    }

    /// Get a scheme by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn VersionScheme>> {
        let result = self.schemes.iter().find(|s| s.name() == name).cloned();
        debug!(scheme = name, found = result.is_some(), "scheme registry lookup");
        result
    }

    /// Resolve a configured scheme name, erroring on unknown names
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn VersionScheme>> {
        self.get(name)
            .ok_or_else(|| VersionError::UnknownScheme(name.to_string()))
    }

    /// Get all registered scheme names
    pub fn names(&self) -> Vec<&'static str> {
        self.schemes.iter().map(|s| s.name()).collect()
    }
}

impl Default for SchemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_builtins() {
        let registry = SchemeRegistry::new();
        let names = registry.names();

        assert!(names.contains(&"pep440"));
        assert!(names.contains(&"semver"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_resolve_unknown_scheme() {
        let registry = SchemeRegistry::new();
        assert!(matches!(
            registry.resolve("calver"),
            Err(VersionError::UnknownScheme(_))
        ));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = SchemeRegistry::empty();
        assert!(registry.get("pep440").is_none());

        registry.register(Pep440::new());
        assert!(registry.resolve("pep440").is_ok());
    }
}
