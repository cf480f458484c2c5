//! Equipped-slot map.
//!
//! Four fixed body locations, each holding at most one item. The map owns
//! the equipped items by value; anything removed from it is handed back to
//! the caller.

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::item::InventoryItem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Armor,
    Accessory,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EquipmentSlots {
    pub main_hand: Option<InventoryItem>,
    pub off_hand: Option<InventoryItem>,
    pub armor: Option<InventoryItem>,
    pub accessory: Option<InventoryItem>,
}

impl EquipmentSlots {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<&InventoryItem> {
        self.cell(slot).as_ref()
    }

    pub fn is_occupied(&self, slot: EquipSlot) -> bool {
        self.get(slot).is_some()
    }

    /// Places `item` in `slot`, returning the previous occupant.
    pub(crate) fn replace(&mut self, slot: EquipSlot, item: InventoryItem) -> Option<InventoryItem> {
        self.cell_mut(slot).replace(item)
    }

    pub(crate) fn take(&mut self, slot: EquipSlot) -> Option<InventoryItem> {
        self.cell_mut(slot).take()
    }

    pub(crate) fn exchange(&mut self, a: EquipSlot, b: EquipSlot) {
        let first = self.take(a);
        let second = self.take(b);
        *self.cell_mut(a) = second;
        *self.cell_mut(b) = first;
    }

    /// Iterates over occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, &InventoryItem)> + '_ {
        EquipSlot::iter().filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn cell(&self, slot: EquipSlot) -> &Option<InventoryItem> {
        match slot {
            EquipSlot::MainHand => &self.main_hand,
            EquipSlot::OffHand => &self.off_hand,
            EquipSlot::Armor => &self.armor,
            EquipSlot::Accessory => &self.accessory,
        }
    }

    fn cell_mut(&mut self, slot: EquipSlot) -> &mut Option<InventoryItem> {
        match slot {
            EquipSlot::MainHand => &mut self.main_hand,
            EquipSlot::OffHand => &mut self.off_hand,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }
}

impl IntoIterator for EquipmentSlots {
    type Item = (EquipSlot, InventoryItem);
    type IntoIter = std::vec::IntoIter<(EquipSlot, InventoryItem)>;

    fn into_iter(mut self) -> Self::IntoIter {
        EquipSlot::iter()
            .filter_map(|slot| self.take(slot).map(|item| (slot, item)))
            .collect::<Vec<_>>()
            .into_iter()
    }
}
