//! Class catalog loader.

use std::path::Path;

use anyhow::Context;
use rules_core::{ClassCatalog, ClassDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Class catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassCatalogFile {
    pub classes: Vec<ClassDefinition>,
}

/// Loader for class catalogs from RON files.
pub struct ClassLoader;

impl ClassLoader {
    /// Load and validate a class catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ClassCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse and validate a class catalog from RON text.
    ///
    /// Every definition must pass [`ClassDefinition::validate`], and class ids
    /// must be unique.
    pub fn parse(content: &str) -> LoadResult<ClassCatalog> {
        let file: ClassCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse class catalog RON: {}", e))?;

        let mut catalog = ClassCatalog::new();
        for definition in file.classes {
            definition
                .validate()
                .with_context(|| format!("invalid class definition '{}'", definition.id))?;
            let id = definition.id.clone();
            if catalog.register(definition).is_some() {
                anyhow::bail!("duplicate class id '{}'", id);
            }
        }

        tracing::debug!(classes = catalog.len(), "loaded class catalog");
        Ok(catalog)
    }
}
