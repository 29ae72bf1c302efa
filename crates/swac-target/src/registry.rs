//! In-memory registry of selectable data sources.
//!
//! The source chooser offers a finite set of backends. The set is read
//! from a TOML file with one `[[source]]` table per backend:
//!
//! ```toml
//! [[source]]
//! name = "smartmonitoring"
//! label = "SmartMonitoring"
//! ```

use crate::{
    error::{Result, TargetError},
    selection::InputDescriptor,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::{Arc, RwLock};
use swac_core::SourceName;
use tracing::{debug, info};

/// A backend data source the user can select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Source name, used as the first URL path segment
    pub name: SourceName,

    /// Human-readable label
    #[serde(default)]
    pub label: String,

    /// Optional description shown next to the choice
    #[serde(default)]
    pub description: String,
}

impl SourceDefinition {
    /// Create a definition with the name doubling as label.
    #[must_use]
    pub fn new(name: SourceName) -> Self {
        let label = name.to_string();
        Self {
            name,
            label,
            description: String::new(),
        }
    }

    /// Input descriptor for this source in the chooser widget.
    #[must_use]
    pub fn input(&self) -> InputDescriptor {
        InputDescriptor::new(self.name.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct SourceFile {
    #[serde(default)]
    source: Vec<SourceDefinition>,
}

/// In-memory cache of source definitions.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    /// Cached definitions, indexed by source name
    sources: Arc<RwLock<BTreeMap<SourceName, SourceDefinition>>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from definitions in a TOML file.
    ///
    /// # Errors
    /// Returns error if the file can't be read, isn't valid TOML, contains an
    /// invalid source name, or lists a name twice.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&contents).map_err(|e| match e {
            TargetError::ParseError { source, .. } => TargetError::ParseError {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;

        info!(
            count = registry.len(),
            path = %path.display(),
            "loaded source definitions"
        );

        Ok(registry)
    }

    /// Create a registry from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: SourceFile =
            toml::from_str(contents).map_err(|source| TargetError::ParseError {
                path: "<inline>".to_string(),
                source,
            })?;

        let mut seen = HashSet::new();
        for definition in &file.source {
            if !seen.insert(definition.name.clone()) {
                return Err(TargetError::ValidationError {
                    reason: format!("duplicate source name '{}'", definition.name),
                });
            }
        }

        let registry = Self::new();
        {
            let mut cache = registry.sources.write().expect("acquire write lock on sources");
            for definition in file.source {
                cache.insert(definition.name.clone(), definition);
            }
        }

        Ok(registry)
    }

    /// Get a source definition by name.
    ///
    /// # Errors
    /// Returns error if the source is not registered.
    pub fn get(&self, name: &str) -> Result<SourceDefinition> {
        let cache = self.sources.read().expect("acquire read lock on sources");

        cache
            .get(name)
            .cloned()
            .ok_or_else(|| TargetError::NotFound {
                name: name.to_string(),
            })
    }

    /// Check if a source is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        let cache = self.sources.read().expect("acquire read lock on sources");
        cache.contains_key(name)
    }

    /// All registered source names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<SourceName> {
        let cache = self.sources.read().expect("acquire read lock on sources");
        cache.keys().cloned().collect()
    }

    /// Input descriptors for every source, in name order.
    #[must_use]
    pub fn inputs(&self) -> Vec<InputDescriptor> {
        let cache = self.sources.read().expect("acquire read lock on sources");
        cache.values().map(SourceDefinition::input).collect()
    }

    /// Number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        let cache = self.sources.read().expect("acquire read lock on sources");
        cache.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add or replace a source definition.
    pub fn insert(&self, definition: SourceDefinition) {
        let mut cache = self.sources.write().expect("acquire write lock on sources");
        debug!(source = %definition.name, "inserted source definition");
        cache.insert(definition.name.clone(), definition);
    }

    /// Remove a source definition.
    ///
    /// Returns `true` if the source was present, `false` otherwise.
    pub fn remove(&self, name: &str) -> bool {
        let mut cache = self.sources.write().expect("acquire write lock on sources");
        let removed = cache.remove(name).is_some();

        if removed {
            debug!(source = %name, "removed source definition");
        }

        removed
    }
}
