use arrayvec::ArrayVec;

use crate::config::RulesConfig;

/// Per-spell-level slot counts; index 0 is first-level spells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpellSlots(ArrayVec<u8, { RulesConfig::MAX_SPELL_LEVEL }>);

impl SpellSlots {
    /// Builds a slot table, or `None` if it describes more spell levels than exist.
    pub fn new(slots: &[u8]) -> Option<Self> {
        ArrayVec::try_from(slots).ok().map(Self)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Slots available at `spell_level` (1-based); zero outside the table.
    pub fn at(&self, spell_level: usize) -> u8 {
        spell_level
            .checked_sub(1)
            .and_then(|index| self.0.get(index))
            .copied()
            .unwrap_or(0)
    }

    /// Highest spell level with at least one slot.
    pub fn highest_level(&self) -> usize {
        self.0
            .iter()
            .rposition(|slots| *slots > 0)
            .map_or(0, |index| index + 1)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|slots| u32::from(*slots)).sum()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// The per-level record of a class's leveling table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionEntry {
    pub level: u32,

    /// Total experience required to reach this level.
    pub xp_required: u64,

    /// Hit-die size rolled (as a fixed average) when this level is gained.
    pub hit_die_increase: u32,

    /// Features granted on reaching this level, drawn from the class feature list.
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<String>,

    /// Replacement slot table; `None` carries the current table forward.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spell_slots: Option<SpellSlots>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub subclass_choice: bool,
}

impl ProgressionEntry {
    pub fn new(level: u32, xp_required: u64, hit_die_increase: u32) -> Self {
        Self {
            level,
            xp_required,
            hit_die_increase,
            features: Vec::new(),
            spell_slots: None,
            subclass_choice: false,
        }
    }

    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_spell_slots(mut self, slots: SpellSlots) -> Self {
        self.spell_slots = Some(slots);
        self
    }

    #[must_use]
    pub fn with_subclass_choice(mut self) -> Self {
        self.subclass_choice = true;
        self
    }

    /// Hit points gained on reaching this level.
    ///
    /// Fixed average-roll policy: half the die rounded up, plus one.
    pub fn hit_point_gain(&self) -> u32 {
        self.hit_die_increase.div_ceil(2) + 1
    }
}
