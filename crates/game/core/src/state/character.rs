//! Character value object.

use crate::catalog::{ClassDefinition, ClassId, SpellSlots};

/// The six ability scores of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Ability modifier: `floor((score - 10) / 2)`.
    pub const fn modifier(score: i32) -> i32 {
        (score - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    /// All scores 10 (no modifiers).
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// A player character.
///
/// Level, XP, hit points, features, subclass and spell slots change only
/// through the [`ProgressionEngine`](crate::progression::ProgressionEngine).
/// The session store owns and persists the value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    name: String,
    class_id: ClassId,
    level: u32,
    xp: u64,
    hp: u32,
    max_hp: u32,
    subclass: Option<String>,
    features: Vec<String>,
    spell_slots: SpellSlots,
    armor_class: i32,
    abilities: AbilityScores,
}

impl Character {
    /// Creates a level-1 character of `class`.
    ///
    /// Starts with zero XP, hit points equal to the class hit die, the
    /// level-1 features and spell slots, and armor class
    /// `10 + dexterity modifier`.
    pub fn from_template(
        name: impl Into<String>,
        class: &ClassDefinition,
        abilities: AbilityScores,
    ) -> Self {
        let first = class.entry(1);
        Self {
            name: name.into(),
            class_id: class.id.clone(),
            level: 1,
            xp: 0,
            hp: class.hit_die,
            max_hp: class.hit_die,
            subclass: None,
            features: first.map(|e| e.features.clone()).unwrap_or_default(),
            spell_slots: first
                .and_then(|e| e.spell_slots.clone())
                .unwrap_or_default(),
            armor_class: 10 + AbilityScores::modifier(abilities.dexterity),
            abilities,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_id(&self) -> &ClassId {
        &self.class_id
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp(&self) -> u64 {
        self.xp
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn subclass(&self) -> Option<&str> {
        self.subclass.as_deref()
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }

    pub fn spell_slots(&self) -> &SpellSlots {
        &self.spell_slots
    }

    /// Armor class before equipment.
    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub(crate) fn add_xp(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub(crate) fn advance(
        &mut self,
        hp_gain: u32,
        features: &[String],
        spell_slots: Option<&SpellSlots>,
    ) {
        self.level += 1;
        self.hp = self.hp.saturating_add(hp_gain);
        self.max_hp = self.max_hp.saturating_add(hp_gain);
        self.features.extend_from_slice(features);
        if let Some(slots) = spell_slots {
            self.spell_slots = slots.clone();
        }
    }

    pub(crate) fn set_subclass(&mut self, subclass: &str) {
        self.subclass = Some(subclass.to_owned());
    }
}
