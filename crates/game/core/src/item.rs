//! Item value objects read by the equipment engine.
//!
//! Items are produced by an external inventory collaborator; this crate only
//! reads them, and the engine hands evicted items back by value.

use core::fmt;

use bitflags::bitflags;
use strum::{Display, EnumIter};

use crate::catalog::ClassId;
use crate::config::RulesConfig;
use crate::state::EquipSlot;
use crate::stats::StatBonuses;

/// Identifier of an item instance.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemCategory {
    Weapon,
    Armor,
    Accessory,
    Consumable,
    Misc,
}

impl ItemCategory {
    /// Categories that may ever occupy an equipment slot.
    pub const fn is_equippable(self) -> bool {
        matches!(self, Self::Weapon | Self::Armor | Self::Accessory)
    }
}

/// Rarity tier, ordered from most to least common.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Rank used by the auto-equip score: common = 1 … legendary = 5.
    pub const fn rank(self) -> u64 {
        match self {
            Self::Common => 1,
            Self::Uncommon => 2,
            Self::Rare => 3,
            Self::Epic => 4,
            Self::Legendary => 5,
        }
    }
}

bitflags! {
    /// Static handling attributes of an item.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u8 {
        /// Occupies both hands when held in the main hand.
        const TWO_HANDED = 1 << 0;
        /// Main-hand weapon light enough to be held in the off hand.
        const DUAL_WIELD = 1 << 1;
    }
}

/// Conditions the wearer must meet at the moment of equipping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Requirements {
    pub min_level: Option<u32>,

    /// Allowed classes; empty means any class.
    pub classes: Vec<ClassId>,
}

impl Requirements {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn level_met(&self, level: u32) -> bool {
        self.min_level.is_none_or(|min| level >= min)
    }

    pub fn class_met(&self, class_id: &ClassId) -> bool {
        self.classes.is_empty() || self.classes.contains(class_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: u16,

    /// Slot this item is made for, if it can be equipped at all.
    #[cfg_attr(feature = "serde", serde(default))]
    pub slot: Option<EquipSlot>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: ItemFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: StatBonuses,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weight: u32,
}

#[cfg(feature = "serde")]
fn default_quantity() -> u16 {
    1
}

impl InventoryItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            category,
            rarity: Rarity::Common,
            quantity: 1,
            slot: None,
            flags: ItemFlags::empty(),
            bonuses: StatBonuses::new(),
            requirements: Requirements::none(),
            value: 0,
            weight: 0,
        }
    }

    #[must_use]
    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_bonuses(mut self, bonuses: StatBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }

    #[must_use]
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Returns true if the item's declared affinity admits `slot`.
    ///
    /// A main-hand weapon flagged [`ItemFlags::DUAL_WIELD`] is also admitted
    /// in the off hand. Two-handed items are additionally refused there by
    /// the equipment engine, which knows the name fallback settings.
    pub fn fits(&self, slot: EquipSlot) -> bool {
        match self.slot {
            Some(affinity) if affinity == slot => true,
            Some(EquipSlot::MainHand) => {
                slot == EquipSlot::OffHand && self.flags.contains(ItemFlags::DUAL_WIELD)
            }
            _ => false,
        }
    }

    /// Two-handed classification.
    ///
    /// The explicit [`ItemFlags::TWO_HANDED`] attribute decides. Items without
    /// it fall back to the configured name keywords unless the fallback is
    /// disabled.
    pub fn is_two_handed(&self, config: &RulesConfig) -> bool {
        self.flags.contains(ItemFlags::TWO_HANDED)
            || (config.two_handed_name_fallback && config.name_suggests_two_handed(&self.name))
    }

    /// Auto-equip priority: `rarity rank × 1000 + value`.
    pub fn priority_score(&self) -> u64 {
        self.rarity.rank() * RulesConfig::RARITY_SCORE_WEIGHT + u64::from(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_score_weights_rarity_over_value() {
        let common = InventoryItem::new("s1", "Sword", ItemCategory::Weapon).with_value(10);
        let rare = InventoryItem::new("s2", "Sword", ItemCategory::Weapon)
            .with_rarity(Rarity::Rare)
            .with_value(100);
        let pricey = InventoryItem::new("s3", "Gilded Sword", ItemCategory::Weapon).with_value(999);

        assert_eq!(common.priority_score(), 1010);
        assert_eq!(rare.priority_score(), 3100);
        assert!(pricey.priority_score() < rare.priority_score());
    }

    #[test]
    fn two_handed_flag_wins_over_name() {
        let config = RulesConfig::default();
        let flagged = InventoryItem::new("a", "Big Hammer", ItemCategory::Weapon)
            .with_flags(ItemFlags::TWO_HANDED);
        let by_name = InventoryItem::new("b", "Quarterstaff", ItemCategory::Weapon);
        let one_hand = InventoryItem::new("c", "Mace", ItemCategory::Weapon);

        assert!(flagged.is_two_handed(&config));
        assert!(by_name.is_two_handed(&config));
        assert!(!one_hand.is_two_handed(&config));

        let strict = RulesConfig::default().without_name_fallback();
        assert!(flagged.is_two_handed(&strict));
        assert!(!by_name.is_two_handed(&strict));
    }

    #[test]
    fn dual_wield_admits_off_hand() {
        let dagger = InventoryItem::new("d", "Dagger", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_flags(ItemFlags::DUAL_WIELD);
        let sword =
            InventoryItem::new("s", "Longsword", ItemCategory::Weapon).with_slot(EquipSlot::MainHand);

        assert!(dagger.fits(EquipSlot::MainHand));
        assert!(dagger.fits(EquipSlot::OffHand));
        assert!(!dagger.fits(EquipSlot::Armor));
        assert!(!sword.fits(EquipSlot::OffHand));
        assert!(!InventoryItem::new("p", "Potion", ItemCategory::Consumable).fits(EquipSlot::MainHand));
    }

    #[test]
    fn requirements_gate_on_level_and_class() {
        let reqs = Requirements {
            min_level: Some(3),
            classes: vec![ClassId::new("wizard")],
        };
        assert!(!reqs.level_met(2));
        assert!(reqs.level_met(3));
        assert!(reqs.class_met(&ClassId::new("wizard")));
        assert!(!reqs.class_met(&ClassId::new("fighter")));
        assert!(Requirements::none().class_met(&ClassId::new("fighter")));
    }
}
