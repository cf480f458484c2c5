//! Flat stat bonuses carried by items and summed across equipment slots.

use core::ops::{AddAssign, SubAssign};
use core::str::FromStr;
use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

use super::StatKind;

/// One flat amount per [`StatKind`].
///
/// Used both as an item's declared bonuses and as the equipment engine's
/// aggregate cache. Arithmetic wraps so that adding and then removing the
/// same bonuses always restores the previous totals exactly.
///
/// # Example
/// ```
/// # use rules_core::stats::{StatBonuses, StatKind};
/// let sword = StatBonuses::new().with(StatKind::Attack, 4);
/// let mut totals = StatBonuses::new();
/// totals += &sword;
/// totals += &sword;
/// totals -= &sword;
/// assert_eq!(totals.get(StatKind::Attack), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(from = "BTreeMap<StatKind, i32>", into = "BTreeMap<StatKind, i32>")
)]
pub struct StatBonuses {
    amounts: [i32; StatKind::COUNT],
}

impl StatBonuses {
    /// Creates an empty bonus set (every kind at zero).
    pub const fn new() -> Self {
        Self {
            amounts: [0; StatKind::COUNT],
        }
    }

    /// Sets `kind` to `amount` (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: StatKind, amount: i32) -> Self {
        self.set(kind, amount);
        self
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        self.amounts[kind.index()]
    }

    pub fn set(&mut self, kind: StatKind, amount: i32) {
        self.amounts[kind.index()] = amount;
    }

    /// Returns true if every kind is zero.
    pub fn is_empty(&self) -> bool {
        self.amounts.iter().all(|amount| *amount == 0)
    }

    /// Iterates over the non-zero entries in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, i32)> + '_ {
        StatKind::iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, amount)| *amount != 0)
    }

    /// Builds a bonus set from loosely named entries.
    ///
    /// Names are matched case-insensitively against the vocabulary. Entries
    /// with unknown names are not summed; their names are returned so the
    /// caller can report them. Repeated names accumulate.
    pub fn from_named<'a, I>(entries: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut bonuses = Self::new();
        let mut ignored = Vec::new();
        for (name, amount) in entries {
            match StatKind::from_str(name.trim()) {
                Ok(kind) => {
                    let slot = &mut bonuses.amounts[kind.index()];
                    *slot = slot.wrapping_add(amount);
                }
                Err(_) => ignored.push(name.to_owned()),
            }
        }
        (bonuses, ignored)
    }
}

impl AddAssign<&StatBonuses> for StatBonuses {
    fn add_assign(&mut self, rhs: &StatBonuses) {
        for (total, amount) in self.amounts.iter_mut().zip(rhs.amounts.iter()) {
            *total = total.wrapping_add(*amount);
        }
    }
}

impl SubAssign<&StatBonuses> for StatBonuses {
    fn sub_assign(&mut self, rhs: &StatBonuses) {
        for (total, amount) in self.amounts.iter_mut().zip(rhs.amounts.iter()) {
            *total = total.wrapping_sub(*amount);
        }
    }
}

impl From<BTreeMap<StatKind, i32>> for StatBonuses {
    fn from(map: BTreeMap<StatKind, i32>) -> Self {
        map.into_iter()
            .fold(Self::new(), |bonuses, (kind, amount)| bonuses.with(kind, amount))
    }
}

impl From<StatBonuses> for BTreeMap<StatKind, i32> {
    fn from(bonuses: StatBonuses) -> Self {
        bonuses.iter().collect()
    }
}

impl FromIterator<(StatKind, i32)> for StatBonuses {
    fn from_iter<T: IntoIterator<Item = (StatKind, i32)>>(iter: T) -> Self {
        let mut bonuses = Self::new();
        for (kind, amount) in iter {
            let slot = &mut bonuses.amounts[kind.index()];
            *slot = slot.wrapping_add(amount);
        }
        bonuses
    }
}
