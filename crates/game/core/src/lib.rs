//! Deterministic character rules shared by every front end.
//!
//! `rules-core` defines the class catalog, the leveling state machine and the
//! equipment engine as pure in-memory APIs. Nothing here performs I/O; content
//! loading lives in `rules-content` and session orchestration in
//! `rules-runtime`.
//!
//! Character progression flows through [`ProgressionEngine`], which reads a
//! [`ClassCatalog`]; equipped items and their aggregated bonuses are owned by
//! one [`EquipmentEngine`] per character.
pub mod catalog;
pub mod config;
pub mod equipment;
pub mod error;
pub mod item;
pub mod progression;
pub mod state;
pub mod stats;

pub use catalog::{
    CatalogError, ClassCatalog, ClassDefinition, ClassDefinitionBuilder, ClassId,
    ProgressionEntry, SpellSlots,
};
pub use config::{RulesConfig, SubclassPolicy};
pub use equipment::{AutoEquipReport, EquipError, EquipOutcome, EquipmentEngine, SkipReason};
pub use error::{ErrorSeverity, RulesError};
pub use item::{InventoryItem, ItemCategory, ItemFlags, ItemId, Rarity, Requirements};
pub use progression::{LevelUpReport, ProgressionEngine, ProgressionError, ProgressionState};
pub use state::{AbilityScores, Character, EquipSlot, EquipmentSlots};
pub use stats::{StatBonuses, StatKind};
