//! Equipment validation and stat aggregation.
//!
//! One [`EquipmentEngine`] exists per active character. It owns the
//! equipped-slot map and a cached sum of the equipped items' bonuses, and
//! keeps the two consistent: every mutation either completes fully or
//! returns an error before touching anything.
//!
//! Equip validation runs in a fixed order and stops at the first failure:
//! 1. the item's slot affinity admits the target slot (a two-handed item
//!    never fits the off hand)
//! 2. level and class requirements hold for the wearer right now
//! 3. two-handed exclusivity between main hand and off hand
//!
//! Requirements are checked only at equip time; a wearer who later falls
//! below them keeps the item.
mod auto;
mod error;

pub use auto::{AutoEquipReport, SkipReason};
pub use error::EquipError;

use crate::config::RulesConfig;
use crate::item::InventoryItem;
use crate::state::{Character, EquipSlot, EquipmentSlots};
use crate::stats::StatBonuses;

/// Result of a successful equip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquipOutcome {
    pub slot: EquipSlot,
    /// Previous occupant of the slot; ownership returns to the caller.
    pub evicted: Option<InventoryItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EquipmentEngine {
    slots: EquipmentSlots,
    totals: StatBonuses,
    config: RulesConfig,
}

impl EquipmentEngine {
    pub fn new(config: RulesConfig) -> Self {
        Self {
            slots: EquipmentSlots::empty(),
            totals: StatBonuses::new(),
            config,
        }
    }

    /// Creates an engine around an existing slot map (e.g. restored from storage).
    pub fn from_slots(slots: EquipmentSlots, config: RulesConfig) -> Self {
        let mut engine = Self::new(config);
        engine.rebuild_from(slots);
        engine
    }

    /// Replaces the slot map wholesale and recomputes the aggregate.
    ///
    /// Returns the previous slot map. No validation is applied to `slots`.
    pub fn rebuild_from(&mut self, slots: EquipmentSlots) -> EquipmentSlots {
        let previous = core::mem::replace(&mut self.slots, slots);
        let mut totals = StatBonuses::new();
        for (_, item) in self.equipped() {
            totals += &item.bonuses;
        }
        self.totals = totals;
        previous
    }

    pub fn slots(&self) -> &EquipmentSlots {
        &self.slots
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Equipped items in slot order.
    pub fn equipped(&self) -> impl Iterator<Item = (EquipSlot, &InventoryItem)> + '_ {
        self.slots.iter()
    }

    /// Sum of the bonuses of every equipped item.
    pub fn total_stats(&self) -> StatBonuses {
        self.totals
    }

    /// Wearer's base armor class plus the equipped defense bonus.
    pub fn armor_class(&self, wearer: &Character) -> i32 {
        wearer.armor_class() + self.totals.get(crate::stats::StatKind::Defense)
    }

    /// Runs the equip checks without changing anything.
    ///
    /// # Errors
    ///
    /// Returns the first failed check in validation order.
    pub fn can_equip(
        &self,
        wearer: &Character,
        item: &InventoryItem,
        slot: EquipSlot,
    ) -> Result<(), EquipError> {
        self.check_item(wearer, item, slot)?;

        match slot {
            EquipSlot::MainHand if item.is_two_handed(&self.config) => {
                if self.slots.is_occupied(EquipSlot::OffHand) {
                    return Err(EquipError::OffHandOccupied {
                        item: item.id.clone(),
                    });
                }
            }
            EquipSlot::OffHand => {
                if let Some(main) = self.two_hander_in_main() {
                    return Err(EquipError::MainHandTwoHanded {
                        two_hander: main.id.clone(),
                    });
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Equips a copy of `item` into `slot`, evicting the previous occupant.
    ///
    /// Re-equipping the same item into the same slot leaves the totals as
    /// they were.
    ///
    /// # Errors
    ///
    /// See [`EquipmentEngine::can_equip`]; the slot map is unchanged on error.
    pub fn equip(
        &mut self,
        wearer: &Character,
        item: &InventoryItem,
        slot: EquipSlot,
    ) -> Result<EquipOutcome, EquipError> {
        self.can_equip(wearer, item, slot)?;

        let evicted = self.slots.replace(slot, item.clone());
        if let Some(previous) = &evicted {
            self.totals -= &previous.bonuses;
        }
        self.totals += &item.bonuses;

        Ok(EquipOutcome { slot, evicted })
    }

    /// Empties `slot`, returning its occupant. `None` if it was already empty.
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<InventoryItem> {
        let removed = self.slots.take(slot)?;
        self.totals -= &removed.bonuses;
        Some(removed)
    }

    /// Exchanges the occupants of two slots, all or nothing.
    ///
    /// Both legs are validated against the wearer before anything moves, as
    /// is two-handed exclusivity of the resulting layout. Swapping a slot with
    /// itself, or two empty slots, succeeds without effect.
    ///
    /// # Errors
    ///
    /// Returns the first illegal leg; neither slot changes.
    pub fn swap(
        &mut self,
        wearer: &Character,
        a: EquipSlot,
        b: EquipSlot,
    ) -> Result<(), EquipError> {
        if a == b {
            return Ok(());
        }

        let into_b = self.slots.get(a);
        let into_a = self.slots.get(b);
        if let Some(item) = into_b {
            self.check_item(wearer, item, b)?;
        }
        if let Some(item) = into_a {
            self.check_item(wearer, item, a)?;
        }

        let resident_after = |slot: EquipSlot| {
            if slot == a {
                into_a
            } else if slot == b {
                into_b
            } else {
                self.slots.get(slot)
            }
        };
        if let Some(main) = resident_after(EquipSlot::MainHand)
            && main.is_two_handed(&self.config)
            && resident_after(EquipSlot::OffHand).is_some()
        {
            return Err(EquipError::OffHandOccupied {
                item: main.id.clone(),
            });
        }

        self.slots.exchange(a, b);
        Ok(())
    }

    /// Affinity and requirement checks for placing `item` in `slot`.
    fn check_item(
        &self,
        wearer: &Character,
        item: &InventoryItem,
        slot: EquipSlot,
    ) -> Result<(), EquipError> {
        if !item.category.is_equippable() || item.slot.is_none() {
            return Err(EquipError::NotEquippable {
                item: item.id.clone(),
            });
        }
        if !item.fits(slot) || (slot == EquipSlot::OffHand && item.is_two_handed(&self.config)) {
            return Err(EquipError::SlotMismatch {
                item: item.id.clone(),
                slot,
            });
        }

        let requirements = &item.requirements;
        if !requirements.level_met(wearer.level()) {
            return Err(EquipError::LevelTooLow {
                item: item.id.clone(),
                required: requirements.min_level.unwrap_or_default(),
                current: wearer.level(),
            });
        }
        if !requirements.class_met(wearer.class_id()) {
            return Err(EquipError::ClassNotAllowed {
                item: item.id.clone(),
                class: wearer.class_id().clone(),
            });
        }
        Ok(())
    }

    fn two_hander_in_main(&self) -> Option<&InventoryItem> {
        self.slots
            .get(EquipSlot::MainHand)
            .filter(|item| item.is_two_handed(&self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ClassDefinition, ClassId, ProgressionEntry};
    use crate::item::{ItemCategory, ItemFlags, Requirements};
    use crate::state::AbilityScores;
    use crate::stats::StatKind;

    fn wearer() -> Character {
        let class = ClassDefinition::builder("wizard", "Wizard")
            .hit_die(6)
            .level(ProgressionEntry::new(1, 0, 6))
            .build();
        Character::from_template("Mira", &class, AbilityScores::default())
    }

    fn quarterstaff() -> InventoryItem {
        InventoryItem::new("staff", "Quarterstaff", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_bonuses(StatBonuses::new().with(StatKind::Attack, 4))
    }

    fn shield() -> InventoryItem {
        InventoryItem::new("shield", "Shield", ItemCategory::Armor)
            .with_slot(EquipSlot::OffHand)
            .with_bonuses(StatBonuses::new().with(StatKind::Defense, 2))
    }

    fn dagger(id: &str) -> InventoryItem {
        InventoryItem::new(id, "Dagger", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_flags(ItemFlags::DUAL_WIELD)
            .with_bonuses(StatBonuses::new().with(StatKind::Attack, 2))
    }

    #[test]
    fn shield_blocked_by_quarterstaff() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        engine
            .equip(&hero, &quarterstaff(), EquipSlot::MainHand)
            .expect("staff equips");

        let err = engine
            .equip(&hero, &shield(), EquipSlot::OffHand)
            .unwrap_err();

        assert!(matches!(err, EquipError::MainHandTwoHanded { .. }));
        assert!(!engine.slots().is_occupied(EquipSlot::OffHand));
        assert_eq!(engine.total_stats().get(StatKind::Defense), 0);
    }

    #[test]
    fn two_hander_blocked_by_occupied_off_hand() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        engine
            .equip(&hero, &shield(), EquipSlot::OffHand)
            .expect("shield equips");
        let before = engine.clone();

        let err = engine
            .equip(&hero, &quarterstaff(), EquipSlot::MainHand)
            .unwrap_err();

        assert!(matches!(err, EquipError::OffHandOccupied { .. }));
        assert_eq!(engine, before);
    }

    #[test]
    fn explicit_flag_without_name_fallback() {
        let mut engine = EquipmentEngine::new(RulesConfig::default().without_name_fallback());
        let hero = wearer();
        engine
            .equip(&hero, &quarterstaff(), EquipSlot::MainHand)
            .expect("staff equips");
        engine
            .equip(&hero, &shield(), EquipSlot::OffHand)
            .expect("name alone no longer blocks the shield");

        let greataxe = InventoryItem::new("axe", "Big Axe", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_flags(ItemFlags::TWO_HANDED);
        assert!(matches!(
            engine.equip(&hero, &greataxe, EquipSlot::MainHand),
            Err(EquipError::OffHandOccupied { .. })
        ));
    }

    #[test]
    fn validation_order_stops_at_first_failure() {
        let engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        let gated = quarterstaff().with_requirements(Requirements {
            min_level: Some(5),
            classes: vec![ClassId::new("cleric")],
        });

        assert!(matches!(
            engine.can_equip(&hero, &gated, EquipSlot::Armor),
            Err(EquipError::SlotMismatch { .. })
        ));
        assert!(matches!(
            engine.can_equip(&hero, &gated, EquipSlot::MainHand),
            Err(EquipError::LevelTooLow {
                required: 5,
                current: 1,
                ..
            })
        ));

        let class_only = quarterstaff().with_requirements(Requirements {
            min_level: None,
            classes: vec![ClassId::new("cleric")],
        });
        assert!(matches!(
            engine.can_equip(&hero, &class_only, EquipSlot::MainHand),
            Err(EquipError::ClassNotAllowed { .. })
        ));

        let potion = InventoryItem::new("potion", "Potion", ItemCategory::Consumable)
            .with_slot(EquipSlot::Accessory);
        assert!(matches!(
            engine.can_equip(&hero, &potion, EquipSlot::Accessory),
            Err(EquipError::NotEquippable { .. })
        ));
    }

    #[test]
    fn equip_is_idempotent() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        let staff = quarterstaff();

        let first = engine.equip(&hero, &staff, EquipSlot::MainHand).expect("first");
        let once = engine.total_stats();
        let second = engine.equip(&hero, &staff, EquipSlot::MainHand).expect("second");

        assert!(first.evicted.is_none());
        assert_eq!(second.evicted.as_ref().map(|i| &i.id), Some(&staff.id));
        assert_eq!(engine.total_stats(), once);
    }

    #[test]
    fn unequip_subtracts_bonuses() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        engine.equip(&hero, &shield(), EquipSlot::OffHand).expect("shield");
        assert_eq!(engine.armor_class(&hero), 12);

        let removed = engine.unequip(EquipSlot::OffHand);

        assert_eq!(removed.map(|i| i.id), Some(shield().id));
        assert!(engine.total_stats().is_empty());
        assert_eq!(engine.armor_class(&hero), 10);
        assert!(engine.unequip(EquipSlot::OffHand).is_none());
    }

    #[test]
    fn swap_moves_dual_wield_weapons() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        engine.equip(&hero, &dagger("left"), EquipSlot::MainHand).expect("main");
        engine.equip(&hero, &dagger("right"), EquipSlot::OffHand).expect("off");
        let totals = engine.total_stats();

        engine
            .swap(&hero, EquipSlot::MainHand, EquipSlot::OffHand)
            .expect("daggers swap");

        assert_eq!(
            engine.slots().get(EquipSlot::MainHand).map(|i| i.id.as_str()),
            Some("right")
        );
        assert_eq!(
            engine.slots().get(EquipSlot::OffHand).map(|i| i.id.as_str()),
            Some("left")
        );
        assert_eq!(engine.total_stats(), totals);
    }

    #[test]
    fn swap_is_all_or_nothing() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        engine.equip(&hero, &dagger("blade"), EquipSlot::MainHand).expect("main");
        engine.equip(&hero, &shield(), EquipSlot::OffHand).expect("off");
        let before = engine.clone();

        // The dagger may go off-hand, but the shield may not go main-hand.
        let err = engine
            .swap(&hero, EquipSlot::MainHand, EquipSlot::OffHand)
            .unwrap_err();

        assert!(matches!(err, EquipError::SlotMismatch { .. }));
        assert_eq!(engine, before);

        assert!(engine.swap(&hero, EquipSlot::Armor, EquipSlot::Armor).is_ok());
        assert!(engine.swap(&hero, EquipSlot::Armor, EquipSlot::Accessory).is_ok());
        assert_eq!(engine, before);
    }

    #[test]
    fn off_hand_refuses_two_handers() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        let twin_blade = InventoryItem::new("twin", "Twin Blade", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_flags(ItemFlags::TWO_HANDED | ItemFlags::DUAL_WIELD);
        let named = InventoryItem::new("pike", "Light Pike", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_flags(ItemFlags::DUAL_WIELD);

        assert!(matches!(
            engine.can_equip(&hero, &twin_blade, EquipSlot::OffHand),
            Err(EquipError::SlotMismatch { slot: EquipSlot::OffHand, .. })
        ));
        assert!(matches!(
            engine.can_equip(&hero, &named, EquipSlot::OffHand),
            Err(EquipError::SlotMismatch { .. })
        ));

        engine.equip(&hero, &twin_blade, EquipSlot::MainHand).expect("main");
        let before = engine.clone();
        assert!(matches!(
            engine.swap(&hero, EquipSlot::MainHand, EquipSlot::OffHand),
            Err(EquipError::SlotMismatch { .. })
        ));
        assert_eq!(engine, before);
    }

    #[test]
    fn spiked_club_leaves_off_hand_free() {
        let mut engine = EquipmentEngine::new(RulesConfig::default());
        let hero = wearer();
        let club = InventoryItem::new("club", "Spiked Club", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand);

        engine.equip(&hero, &club, EquipSlot::MainHand).expect("club");
        engine
            .equip(&hero, &shield(), EquipSlot::OffHand)
            .expect("one-handed club leaves room for the shield");
        assert_eq!(engine.total_stats().get(StatKind::Defense), 2);
    }

    #[test]
    fn swap_rejects_two_hander_layout() {
        let greatsword = InventoryItem::new("gs", "Greatsword", ItemCategory::Weapon)
            .with_slot(EquipSlot::MainHand)
            .with_flags(ItemFlags::TWO_HANDED);
        // Restored slot maps are taken as stored, so the off hand may hold one.
        let mut slots = EquipmentSlots::empty();
        slots.main_hand = Some(dagger("main"));
        slots.off_hand = Some(greatsword);
        let mut engine = EquipmentEngine::from_slots(slots, RulesConfig::default());
        let hero = wearer();
        let before = engine.clone();

        assert!(matches!(
            engine.swap(&hero, EquipSlot::OffHand, EquipSlot::MainHand),
            Err(EquipError::OffHandOccupied { .. })
        ));
        assert_eq!(engine, before);
    }

    #[test]
    fn rebuild_recomputes_aggregate() {
        let mut slots = EquipmentSlots::empty();
        slots.off_hand = Some(shield());
        slots.main_hand = Some(dagger("d"));

        let engine = EquipmentEngine::from_slots(slots, RulesConfig::default());

        assert_eq!(engine.total_stats().get(StatKind::Attack), 2);
        assert_eq!(engine.total_stats().get(StatKind::Defense), 2);
        let order: Vec<_> = engine.equipped().map(|(slot, _)| slot).collect();
        assert_eq!(order, vec![EquipSlot::MainHand, EquipSlot::OffHand]);
    }
}
