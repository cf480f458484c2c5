use strum::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

/// Closed set of stat kinds that equipment may modify.
///
/// Discriminants are dense from zero so a kind can index a fixed array.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StatKind {
    Attack,
    Defense,
    Health,
    Mana,
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl StatKind {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}
