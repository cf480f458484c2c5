//! Content factory for building catalogs from data files.

use std::path::{Path, PathBuf};

use rules_core::{ClassCatalog, InventoryItem, RulesConfig};

use crate::loaders::{ClassLoader, ConfigLoader, ItemLoader, LoadResult};

/// Content factory that loads all rules content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml    (optional)
/// ├── classes.ron
/// └── items.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load rules configuration from `rules.toml`, or defaults if the file is absent.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        let path = self.data_dir.join("rules.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no rules.toml; using default config");
            return Ok(RulesConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the class catalog from `classes.ron`.
    pub fn load_classes(&self) -> LoadResult<ClassCatalog> {
        let path = self.data_dir.join("classes.ron");
        ClassLoader::load(&path)
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<InventoryItem>> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
