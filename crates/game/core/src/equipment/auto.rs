//! Greedy best-in-slot selection.
//!
//! Candidates are taken in descending [`InventoryItem::priority_score`] order
//! and each goes into its affinity slot only if the slot is empty or holds a
//! strictly lower-scored item. Ties keep the incumbent. The heuristic is
//! local per slot and ignores cross-slot synergies.

use core::cmp::Reverse;

use super::{EquipError, EquipmentEngine};
use crate::item::{InventoryItem, ItemId};
use crate::state::{Character, EquipSlot};

/// Why a candidate was left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The slot already holds an item scoring at least as high.
    Outranked { incumbent: ItemId },
    /// Equip validation refused the candidate.
    Rejected(EquipError),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoEquipReport {
    pub equipped: Vec<(EquipSlot, ItemId)>,
    /// Items displaced from the slot map; ownership returns to the caller.
    pub evicted: Vec<InventoryItem>,
    pub skipped: Vec<(ItemId, SkipReason)>,
}

impl EquipmentEngine {
    pub fn auto_equip_best(
        &mut self,
        wearer: &Character,
        candidates: &[InventoryItem],
    ) -> AutoEquipReport {
        let mut ordered: Vec<&InventoryItem> = candidates.iter().collect();
        // Stable sort: equal scores keep their input order.
        ordered.sort_by_key(|item| Reverse(item.priority_score()));

        let mut report = AutoEquipReport::default();
        for item in ordered {
            let Some(slot) = item.slot else {
                report.skipped.push((
                    item.id.clone(),
                    SkipReason::Rejected(EquipError::NotEquippable {
                        item: item.id.clone(),
                    }),
                ));
                continue;
            };

            if let Some(incumbent) = self.slots().get(slot) {
                if incumbent.priority_score() >= item.priority_score() {
                    report.skipped.push((
                        item.id.clone(),
                        SkipReason::Outranked {
                            incumbent: incumbent.id.clone(),
                        },
                    ));
                    continue;
                }
            }

            match self.equip(wearer, item, slot) {
                Ok(outcome) => {
                    report.equipped.push((slot, item.id.clone()));
                    report.evicted.extend(outcome.evicted);
                }
                Err(err) => report.skipped.push((item.id.clone(), SkipReason::Rejected(err))),
            }
        }
        report
    }
}
