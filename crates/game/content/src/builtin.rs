//! Standard content compiled into the crate.
//!
//! Four classes (fighter, wizard, cleric, rogue) over levels 1-10 and a
//! starter item set. The RON sources live in `data/` beside this crate and
//! are parsed with the same loaders used for files on disk.

use rules_core::{ClassCatalog, InventoryItem, RulesConfig};

use crate::loaders::{ClassLoader, ConfigLoader, ItemLoader, LoadResult};

pub const CLASSES_RON: &str = include_str!("../data/classes.ron");
pub const ITEMS_RON: &str = include_str!("../data/items.ron");
pub const RULES_TOML: &str = include_str!("../data/rules.toml");

pub fn standard_catalog() -> LoadResult<ClassCatalog> {
    ClassLoader::parse(CLASSES_RON)
}

pub fn standard_items() -> LoadResult<Vec<InventoryItem>> {
    ItemLoader::parse(ITEMS_RON)
}

pub fn standard_config() -> LoadResult<RulesConfig> {
    ConfigLoader::parse(RULES_TOML)
}
