//! Leveling state machine.
//!
//! ```text
//! Idle ──gain XP──▶ Eligible ──resolve──▶ Idle | Eligible
//!                      │
//!                      └─(next level is the subclass level)─▶ AwaitingSubclassChoice
//!                                                               │ resolve(Some(subclass))
//!                                                               ▼
//!                                                          Idle | Eligible
//! MaxLevel: no progression entry exists for the next level.
//! ```
//!
//! Each [`ProgressionEngine::resolve_level_up`] advances exactly one level so
//! every level's grants surface individually; a multi-level XP surplus is
//! consumed by calling it repeatedly while the returned report says the
//! character is still eligible.
mod error;

pub use error::ProgressionError;

use crate::catalog::{ClassCatalog, ClassDefinition, ProgressionEntry};
use crate::config::{RulesConfig, SubclassPolicy};
use crate::state::Character;

/// Where a character stands relative to its next level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProgressionState {
    /// Stored XP does not reach the next threshold.
    Idle,
    /// The next level can be resolved.
    Eligible,
    /// The next level can be resolved once a subclass is supplied.
    AwaitingSubclassChoice,
    /// No progression data beyond the current level.
    MaxLevel,
}

/// What a single resolved level granted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUpReport {
    pub level: u32,
    pub hp_gained: u32,
    pub features_granted: Vec<String>,
    pub spell_slots_changed: bool,
    /// Subclass recorded by this call.
    pub subclass_recorded: Option<String>,
    /// A subclass was supplied but not applied (already chosen, or not a choice level).
    pub subclass_ignored: bool,
    /// Stored XP already covers the following level.
    pub eligible_for_next: bool,
}

/// Applies experience and level-ups against a borrowed catalog.
#[derive(Clone, Copy, Debug)]
pub struct ProgressionEngine<'a> {
    catalog: &'a ClassCatalog,
    subclass_policy: SubclassPolicy,
}

impl<'a> ProgressionEngine<'a> {
    /// Creates an engine with write-once subclass semantics.
    pub fn new(catalog: &'a ClassCatalog) -> Self {
        Self {
            catalog,
            subclass_policy: SubclassPolicy::WriteOnce,
        }
    }

    pub fn with_config(catalog: &'a ClassCatalog, config: &RulesConfig) -> Self {
        Self {
            catalog,
            subclass_policy: config.subclass_policy,
        }
    }

    pub fn catalog(&self) -> &'a ClassCatalog {
        self.catalog
    }

    /// Adds `amount` XP and returns whether the next level is now reachable.
    ///
    /// XP never decreases; the sum saturates. This never changes the level.
    pub fn gain_experience(&self, character: &mut Character, amount: u64) -> bool {
        character.add_xp(amount);
        self.is_eligible(character)
    }

    /// True iff stored XP meets the threshold of `level + 1`.
    pub fn is_eligible(&self, character: &Character) -> bool {
        self.next_entry(character)
            .is_some_and(|entry| character.xp() >= entry.xp_required)
    }

    /// Number of consecutive levels the stored XP already covers.
    ///
    /// Scans upward from `level + 1` and stops at the first level whose entry
    /// is absent or whose threshold is unmet.
    pub fn pending_levels(&self, character: &Character) -> u32 {
        let Some(class) = self.class_of(character) else {
            return 0;
        };
        let Some(next) = character.level().checked_add(1) else {
            return 0;
        };
        (next..=u32::MAX)
            .map_while(|level| class.entry(level))
            .take_while(|entry| character.xp() >= entry.xp_required)
            .count() as u32
    }

    /// XP still missing for the next level; `None` at the end of the table.
    pub fn xp_to_next_level(&self, character: &Character) -> Option<u64> {
        self.next_entry(character)
            .map(|entry| entry.xp_required.saturating_sub(character.xp()))
    }

    pub fn state(&self, character: &Character) -> ProgressionState {
        let Some(class) = self.class_of(character) else {
            return ProgressionState::MaxLevel;
        };
        let Some(next) = character.level().checked_add(1) else {
            return ProgressionState::MaxLevel;
        };
        match class.entry(next) {
            None => ProgressionState::MaxLevel,
            Some(entry) if character.xp() < entry.xp_required => ProgressionState::Idle,
            Some(_) if class.is_subclass_choice(next) => ProgressionState::AwaitingSubclassChoice,
            Some(_) => ProgressionState::Eligible,
        }
    }

    /// Advances `character` by exactly one level.
    ///
    /// HP rises by the entry's average roll on both current and maximum; the
    /// level's features are appended; a level that defines a spell-slot table
    /// replaces the current one, otherwise the table carries forward.
    ///
    /// At the class's subclass level `chosen_subclass` is mandatory and must
    /// be one of the class's options. Outside it, a supplied subclass only
    /// replaces a recorded one under [`SubclassPolicy::Overwrite`]; otherwise
    /// it is ignored and reported.
    ///
    /// # Errors
    ///
    /// Every check runs before any mutation, so on error the character is
    /// unchanged. See [`ProgressionError`] for the cases.
    pub fn resolve_level_up(
        &self,
        character: &mut Character,
        chosen_subclass: Option<&str>,
    ) -> Result<LevelUpReport, ProgressionError> {
        let class =
            self.class_of(character)
                .ok_or_else(|| ProgressionError::UnknownClass {
                    class: character.class_id().clone(),
                })?;
        let missing = |level| ProgressionError::NoProgressionEntry {
            class: class.id.clone(),
            level,
        };
        let level = character
            .level()
            .checked_add(1)
            .ok_or_else(|| missing(character.level()))?;
        let entry = class.entry(level).ok_or_else(|| missing(level))?;
        if character.xp() < entry.xp_required {
            return Err(ProgressionError::InsufficientExperience {
                level,
                required: entry.xp_required,
                current: character.xp(),
            });
        }

        let decision = self.decide_subclass(class, level, character, chosen_subclass)?;

        character.advance(
            entry.hit_point_gain(),
            &entry.features,
            entry.spell_slots.as_ref(),
        );
        if let SubclassDecision::Record(subclass) = decision {
            character.set_subclass(subclass);
        }

        Ok(LevelUpReport {
            level,
            hp_gained: entry.hit_point_gain(),
            features_granted: entry.features.clone(),
            spell_slots_changed: entry.spell_slots.is_some(),
            subclass_recorded: match decision {
                SubclassDecision::Record(subclass) => Some(subclass.to_owned()),
                _ => None,
            },
            subclass_ignored: matches!(decision, SubclassDecision::Ignore),
            eligible_for_next: self.is_eligible(character),
        })
    }

    /// Records a subclass for a character standing on its class's choice level.
    ///
    /// Level-ups only ever reach levels above 1, so classes that choose at
    /// level 1 record their subclass here. Returns `false` when a subclass is
    /// already recorded and the policy is write-once.
    ///
    /// # Errors
    ///
    /// `NotAtChoiceLevel` unless the current level is the subclass level;
    /// `UnknownSubclass` for a name outside the class's options.
    pub fn choose_subclass(
        &self,
        character: &mut Character,
        subclass: &str,
    ) -> Result<bool, ProgressionError> {
        let class =
            self.class_of(character)
                .ok_or_else(|| ProgressionError::UnknownClass {
                    class: character.class_id().clone(),
                })?;
        if class.subclass_level != Some(character.level()) {
            return Err(ProgressionError::NotAtChoiceLevel {
                class: class.id.clone(),
                level: character.level(),
            });
        }
        if !class.has_subclass(subclass) {
            return Err(ProgressionError::UnknownSubclass {
                class: class.id.clone(),
                subclass: subclass.to_owned(),
            });
        }
        if character.subclass().is_some() && self.subclass_policy == SubclassPolicy::WriteOnce {
            return Ok(false);
        }
        character.set_subclass(subclass);
        Ok(true)
    }

    fn decide_subclass<'s>(
        &self,
        class: &ClassDefinition,
        level: u32,
        character: &Character,
        chosen: Option<&'s str>,
    ) -> Result<SubclassDecision<'s>, ProgressionError> {
        let unknown = |subclass: &str| ProgressionError::UnknownSubclass {
            class: class.id.clone(),
            subclass: subclass.to_owned(),
        };

        if class.is_subclass_choice(level) {
            let subclass = chosen.ok_or_else(|| ProgressionError::MissingSubclassChoice {
                class: class.id.clone(),
                level,
            })?;
            if !class.has_subclass(subclass) {
                return Err(unknown(subclass));
            }
            return Ok(match (character.subclass(), self.subclass_policy) {
                (Some(_), SubclassPolicy::WriteOnce) => SubclassDecision::Ignore,
                _ => SubclassDecision::Record(subclass),
            });
        }

        match (chosen, character.subclass(), self.subclass_policy) {
            (None, _, _) => Ok(SubclassDecision::None),
            (Some(subclass), Some(_), SubclassPolicy::Overwrite) => {
                if class.has_subclass(subclass) {
                    Ok(SubclassDecision::Record(subclass))
                } else {
                    Err(unknown(subclass))
                }
            }
            (Some(_), _, _) => Ok(SubclassDecision::Ignore),
        }
    }

    fn class_of(&self, character: &Character) -> Option<&'a ClassDefinition> {
        self.catalog.lookup(character.class_id().as_str())
    }

    fn next_entry(&self, character: &Character) -> Option<&'a ProgressionEntry> {
        self.class_of(character)?
            .entry(character.level().checked_add(1)?)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubclassDecision<'s> {
    None,
    Record(&'s str),
    Ignore,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpellSlots;
    use crate::state::AbilityScores;

    fn catalog() -> ClassCatalog {
        let fighter = ClassDefinition::builder("fighter", "Fighter")
            .hit_die(10)
            .subclasses(3, ["Champion", "Battle Master"])
            .features(["Fighting Style", "Second Wind", "Action Surge", "Extra Attack"])
            .level(ProgressionEntry::new(1, 0, 10).with_features(["Fighting Style", "Second Wind"]))
            .level(ProgressionEntry::new(2, 300, 10).with_features(["Action Surge"]))
            .level(ProgressionEntry::new(3, 900, 10))
            .level(ProgressionEntry::new(4, 2700, 10))
            .level(ProgressionEntry::new(5, 6500, 10).with_features(["Extra Attack"]))
            .build();

        let slots = |table: &[u8]| SpellSlots::new(table).unwrap_or_default();
        let wizard = ClassDefinition::builder("wizard", "Wizard")
            .hit_die(6)
            .spellcaster()
            .subclasses(2, ["Evocation"])
            .features(["Spellcasting"])
            .level(
                ProgressionEntry::new(1, 0, 6)
                    .with_features(["Spellcasting"])
                    .with_spell_slots(slots(&[2])),
            )
            .level(ProgressionEntry::new(2, 300, 6).with_spell_slots(slots(&[3])))
            .level(ProgressionEntry::new(3, 900, 6))
            .build();

        [fighter, wizard].into_iter().collect()
    }

    fn hero(catalog: &ClassCatalog, class: &str) -> Character {
        let class = catalog.lookup(class).expect("fixture class exists");
        Character::from_template("Hero", class, AbilityScores::default())
    }

    #[test]
    fn fighter_reaches_level_two() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut fighter = hero(&catalog, "fighter");

        assert!(engine.gain_experience(&mut fighter, 350));
        assert_eq!(fighter.level(), 1);
        assert_eq!(engine.state(&fighter), ProgressionState::Eligible);

        let report = engine
            .resolve_level_up(&mut fighter, None)
            .expect("level 2 resolves");

        assert_eq!(fighter.level(), 2);
        assert_eq!(report.hp_gained, 6);
        assert_eq!((fighter.hp(), fighter.max_hp()), (16, 16));
        assert!(fighter.has_feature("Action Surge"));
        assert!(!report.eligible_for_next);
        assert_eq!(engine.state(&fighter), ProgressionState::Idle);
        assert_eq!(engine.xp_to_next_level(&fighter), Some(550));
    }

    #[test]
    fn surplus_is_consumed_one_level_per_call() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut fighter = hero(&catalog, "fighter");

        engine.gain_experience(&mut fighter, 7000);
        assert_eq!(engine.pending_levels(&fighter), 4);

        let report = engine.resolve_level_up(&mut fighter, None).expect("level 2");
        assert_eq!(fighter.level(), 2);
        assert!(report.eligible_for_next);
        assert_eq!(engine.state(&fighter), ProgressionState::AwaitingSubclassChoice);

        engine
            .resolve_level_up(&mut fighter, Some("Champion"))
            .expect("level 3");
        engine.resolve_level_up(&mut fighter, None).expect("level 4");
        let last = engine.resolve_level_up(&mut fighter, None).expect("level 5");

        assert_eq!(fighter.level(), 5);
        assert!(!last.eligible_for_next);
        assert_eq!(fighter.xp(), 7000);
        assert_eq!(engine.state(&fighter), ProgressionState::MaxLevel);
        assert_eq!(engine.xp_to_next_level(&fighter), None);
    }

    #[test]
    fn missing_subclass_leaves_character_unchanged() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut fighter = hero(&catalog, "fighter");
        engine.gain_experience(&mut fighter, 900);
        engine.resolve_level_up(&mut fighter, None).expect("level 2");

        let before = fighter.clone();
        let err = engine.resolve_level_up(&mut fighter, None).unwrap_err();

        assert!(matches!(
            err,
            ProgressionError::MissingSubclassChoice { level: 3, .. }
        ));
        assert_eq!(fighter, before);

        let err = engine
            .resolve_level_up(&mut fighter, Some("Necromancy"))
            .unwrap_err();
        assert!(matches!(err, ProgressionError::UnknownSubclass { .. }));
        assert_eq!(fighter, before);

        let report = engine
            .resolve_level_up(&mut fighter, Some("Battle Master"))
            .expect("level 3 with subclass");
        assert_eq!(report.subclass_recorded.as_deref(), Some("Battle Master"));
        assert_eq!(fighter.subclass(), Some("Battle Master"));
    }

    #[test]
    fn write_once_ignores_later_subclass() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut fighter = hero(&catalog, "fighter");
        engine.gain_experience(&mut fighter, 2700);
        engine.resolve_level_up(&mut fighter, None).expect("level 2");
        engine
            .resolve_level_up(&mut fighter, Some("Champion"))
            .expect("level 3");

        let report = engine
            .resolve_level_up(&mut fighter, Some("Battle Master"))
            .expect("level 4");

        assert!(report.subclass_ignored);
        assert_eq!(report.subclass_recorded, None);
        assert_eq!(fighter.subclass(), Some("Champion"));
    }

    #[test]
    fn overwrite_policy_replaces_subclass() {
        let catalog = catalog();
        let config = RulesConfig::default().with_subclass_policy(SubclassPolicy::Overwrite);
        let engine = ProgressionEngine::with_config(&catalog, &config);
        let mut fighter = hero(&catalog, "fighter");
        engine.gain_experience(&mut fighter, 2700);
        engine.resolve_level_up(&mut fighter, None).expect("level 2");
        engine
            .resolve_level_up(&mut fighter, Some("Champion"))
            .expect("level 3");

        let report = engine
            .resolve_level_up(&mut fighter, Some("Battle Master"))
            .expect("level 4");

        assert_eq!(report.subclass_recorded.as_deref(), Some("Battle Master"));
        assert_eq!(fighter.subclass(), Some("Battle Master"));
    }

    #[test]
    fn subclass_before_choice_level_is_ignored() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut fighter = hero(&catalog, "fighter");
        engine.gain_experience(&mut fighter, 300);

        let report = engine
            .resolve_level_up(&mut fighter, Some("Champion"))
            .expect("level 2");

        assert!(report.subclass_ignored);
        assert_eq!(fighter.subclass(), None);
    }

    #[test]
    fn resolve_requires_threshold_and_entry() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut wizard = hero(&catalog, "wizard");

        let err = engine.resolve_level_up(&mut wizard, None).unwrap_err();
        assert!(matches!(
            err,
            ProgressionError::InsufficientExperience {
                level: 2,
                required: 300,
                current: 0
            }
        ));

        engine.gain_experience(&mut wizard, 100_000);
        engine
            .resolve_level_up(&mut wizard, Some("Evocation"))
            .expect("level 2");
        engine.resolve_level_up(&mut wizard, None).expect("level 3");

        let before = wizard.clone();
        let err = engine.resolve_level_up(&mut wizard, None).unwrap_err();
        assert!(matches!(
            err,
            ProgressionError::NoProgressionEntry { level: 4, .. }
        ));
        assert_eq!(wizard, before);
        assert!(!engine.is_eligible(&wizard));
    }

    #[test]
    fn spell_slots_replace_or_carry_forward() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut wizard = hero(&catalog, "wizard");
        engine.gain_experience(&mut wizard, 900);

        let second = engine
            .resolve_level_up(&mut wizard, Some("Evocation"))
            .expect("level 2");
        assert!(second.spell_slots_changed);
        assert_eq!(wizard.spell_slots().at(1), 3);

        let third = engine.resolve_level_up(&mut wizard, None).expect("level 3");
        assert!(!third.spell_slots_changed);
        assert_eq!(wizard.spell_slots().at(1), 3);
    }

    #[test]
    fn xp_never_decreases() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let mut fighter = hero(&catalog, "fighter");

        let mut last = fighter.xp();
        for amount in [0, 10, 0, 290, u64::MAX, 5] {
            let eligible = engine.gain_experience(&mut fighter, amount);
            assert!(fighter.xp() >= last);
            assert_eq!(eligible, fighter.xp() >= 300);
            last = fighter.xp();
        }
        assert_eq!(fighter.xp(), u64::MAX);
    }

    #[test]
    fn unknown_class_is_illegal_state() {
        let catalog = catalog();
        let engine = ProgressionEngine::new(&catalog);
        let stranger = ClassDefinition::builder("bard", "Bard")
            .level(ProgressionEntry::new(1, 0, 8))
            .build();
        let mut bard = Character::from_template("Lute", &stranger, AbilityScores::default());

        assert!(!engine.gain_experience(&mut bard, 1000));
        assert_eq!(engine.state(&bard), ProgressionState::MaxLevel);
        assert_eq!(engine.pending_levels(&bard), 0);
        assert!(matches!(
            engine.resolve_level_up(&mut bard, None),
            Err(ProgressionError::UnknownClass { .. })
        ));
    }

    #[test]
    fn level_one_subclass_is_chosen_directly() {
        let cleric = ClassDefinition::builder("cleric", "Cleric")
            .subclasses(1, ["Life Domain", "Light Domain"])
            .level(ProgressionEntry::new(1, 0, 8))
            .level(ProgressionEntry::new(2, 300, 8))
            .build();
        let catalog: ClassCatalog = [cleric].into_iter().collect();
        let engine = ProgressionEngine::new(&catalog);
        let mut priest = hero(&catalog, "cleric");

        assert!(matches!(
            engine.choose_subclass(&mut priest, "Grave Domain"),
            Err(ProgressionError::UnknownSubclass { .. })
        ));
        assert_eq!(priest.subclass(), None);

        assert_eq!(engine.choose_subclass(&mut priest, "Life Domain"), Ok(true));
        assert_eq!(engine.choose_subclass(&mut priest, "Light Domain"), Ok(false));
        assert_eq!(priest.subclass(), Some("Life Domain"));

        engine.gain_experience(&mut priest, 300);
        engine.resolve_level_up(&mut priest, None).expect("level 2");
        assert!(matches!(
            engine.choose_subclass(&mut priest, "Light Domain"),
            Err(ProgressionError::NotAtChoiceLevel { level: 2, .. })
        ));
    }
}
