//! Pipeline configuration.
//!
//! Embedding tools select a filter by language name and flavor string.
//! [`FilterConfig`] carries that selection and can be loaded from a TOML
//! file, so a host tool's project configuration can pin the dialect:
//!
//! ```toml
//! language = "GNU C++"
//! flavor = "C++17"
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::filter::LanguageFilter;
use crate::registry;

/// Filter selection for one token pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterConfig {
    /// Registry language name (e.g. `"GNU C"`, `"Fortran"`).
    pub language: String,

    /// Dialect flavor (e.g. `"C++11"`, `"free"`). Empty means the
    /// language default.
    #[serde(default)]
    pub flavor: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            language: registry::LANG_C.to_string(),
            flavor: String::new(),
        }
    }
}

impl FilterConfig {
    #[must_use]
    pub fn new(language: &str, flavor: &str) -> FilterConfig {
        FilterConfig {
            language: language.to_string(),
            flavor: flavor.to_string(),
        }
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: FilterConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Check the selection against the registry's recognized names.
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        let known = [
            registry::LANG_C,
            registry::LANG_GNU_C,
            registry::LANG_CPP,
            registry::LANG_GNU_CPP,
            registry::LANG_FORTRAN,
        ];
        if !known.contains(&self.language.as_str()) {
            return Some(format!("unknown language '{}'", self.language));
        }
        if self.language == registry::LANG_GNU_CPP
            && !self.flavor.is_empty()
            && ![
                registry::FLAVOR_CPP98,
                registry::FLAVOR_CPP11,
                registry::FLAVOR_CPP14,
                registry::FLAVOR_CPP17,
            ]
            .contains(&self.flavor.as_str())
        {
            return Some(format!("unknown C++ flavor '{}'", self.flavor));
        }
        if self.language == registry::LANG_FORTRAN
            && !self.flavor.is_empty()
            && self.flavor != registry::FLAVOR_FORTRAN_FIXED
            && self.flavor != registry::FLAVOR_FORTRAN_FREE
        {
            return Some(format!("unknown Fortran flavor '{}'", self.flavor));
        }
        None
    }

    /// Resolve the configured filter through the registry.
    #[must_use]
    pub fn resolve(&self) -> Option<Arc<dyn LanguageFilter>> {
        registry::filter_for(&self.language, &self.flavor)
    }
}
