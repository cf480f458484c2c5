//! Item catalog loader.
//!
//! Item files name stat bonuses with free-form keys; keys outside the stat
//! vocabulary are logged and dropped rather than failing the load.
//!
//! `flags` is written as a parenthesized string of `|`-separated flag names,
//! `flags: ("TWO_HANDED")` or `flags: ("TWO_HANDED | DUAL_WIELD")`; omitted
//! means no flags.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use rules_core::{
    EquipSlot, InventoryItem, ItemCategory, ItemFlags, ItemId, Rarity, Requirements, StatBonuses,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemSpec>,
}

/// On-disk form of an [`InventoryItem`] with loosely named bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    pub id: String,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default = "default_quantity")]
    pub quantity: u16,
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    #[serde(default)]
    pub flags: ItemFlags,
    #[serde(default)]
    pub bonuses: BTreeMap<String, i32>,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub weight: u32,
}

fn default_quantity() -> u16 {
    1
}

impl ItemSpec {
    /// Converts to an item, returning the bonus keys that matched no stat.
    pub fn into_item(self) -> (InventoryItem, Vec<String>) {
        let (bonuses, ignored) =
            StatBonuses::from_named(self.bonuses.iter().map(|(k, v)| (k.as_str(), *v)));
        let item = InventoryItem {
            id: ItemId(self.id),
            name: self.name,
            category: self.category,
            rarity: self.rarity,
            quantity: self.quantity,
            slot: self.slot,
            flags: self.flags,
            bonuses,
            requirements: self.requirements,
            value: self.value,
            weight: self.weight,
        };
        (item, ignored)
    }
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<InventoryItem>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse an item catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<InventoryItem>> {
        let catalog: ItemCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let items: Vec<InventoryItem> = catalog
            .items
            .into_iter()
            .map(|spec| {
                let (item, ignored) = spec.into_item();
                for key in &ignored {
                    tracing::warn!(item = %item.id, stat = %key, "ignoring unknown stat bonus");
                }
                item
            })
            .collect();

        tracing::debug!(items = items.len(), "loaded item catalog");
        Ok(items)
    }
}
