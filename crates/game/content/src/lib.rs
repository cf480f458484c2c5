//! Data-driven rules content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Class catalogs with leveling tables (RON)
//! - Item catalogs (RON)
//! - Rules configuration (TOML)
//!
//! It also ships a standard catalog embedded at compile time in [`builtin`].
//! Content is loaded once at startup and handed to the engines by reference.

#[cfg(feature = "loaders")]
pub mod builtin;
#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ClassCatalogFile, ClassLoader, ConfigLoader, ContentFactory, ItemCatalogFile, ItemLoader,
    ItemSpec, LoadResult,
};
