//! Content loaders for reading rules data from files.
//!
//! Class and item catalogs are RON; the rules configuration is TOML. Each
//! loader exposes `load(path)` for files and `parse(text)` for embedded data.

pub mod classes;
pub mod config;
pub mod factory;
pub mod item;

pub use classes::{ClassCatalogFile, ClassLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::{ItemCatalogFile, ItemLoader, ItemSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
