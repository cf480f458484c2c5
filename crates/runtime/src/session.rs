//! Single-character session over the rules engines.
//!
//! The session pairs the active [`Character`] with its [`EquipmentEngine`]
//! and a shared [`ClassCatalog`]. Every mutation is forwarded to the owning
//! engine and logged; rejected operations leave the session unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use rules_content::{ContentFactory, builtin};
use rules_core::{
    AbilityScores, AutoEquipReport, Character, ClassCatalog, ClassId, EquipOutcome, EquipSlot,
    EquipmentEngine, EquipmentSlots, InventoryItem, LevelUpReport, ProgressionEngine,
    ProgressionState, RulesConfig, RulesError, StatBonuses,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SessionError};

/// Persistable session state: the character and what it has equipped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub character: Character,
    pub equipment: EquipmentSlots,
}

pub struct Session {
    catalog: Arc<ClassCatalog>,
    config: RulesConfig,
    character: Character,
    equipment: EquipmentEngine,
}

impl Session {
    /// Creates a session for `character` with nothing equipped.
    ///
    /// # Errors
    ///
    /// `UnknownClass` if the character's class is not in `catalog`.
    pub fn new(catalog: Arc<ClassCatalog>, config: RulesConfig, character: Character) -> Result<Self> {
        ensure_known_class(&catalog, &character)?;
        let equipment = EquipmentEngine::new(config.clone());
        info!(
            character = character.name(),
            class = %character.class_id(),
            level = character.level(),
            "session started"
        );
        Ok(Self {
            catalog,
            config,
            character,
            equipment,
        })
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn equipment(&self) -> &EquipmentSlots {
        self.equipment.slots()
    }

    // ===== progression =====

    /// Adds experience; returns whether a level-up can now be resolved.
    pub fn gain_experience(&mut self, amount: u64) -> bool {
        let engine = ProgressionEngine::with_config(&self.catalog, &self.config);
        let eligible = engine.gain_experience(&mut self.character, amount);
        debug!(
            amount,
            xp = self.character.xp(),
            eligible,
            "experience gained"
        );
        eligible
    }

    pub fn progression_state(&self) -> ProgressionState {
        self.progression().state(&self.character)
    }

    pub fn pending_levels(&self) -> u32 {
        self.progression().pending_levels(&self.character)
    }

    pub fn xp_to_next_level(&self) -> Option<u64> {
        self.progression().xp_to_next_level(&self.character)
    }

    /// Resolves exactly one level-up.
    pub fn resolve_level_up(&mut self, subclass: Option<&str>) -> Result<LevelUpReport> {
        let engine = ProgressionEngine::with_config(&self.catalog, &self.config);
        match engine.resolve_level_up(&mut self.character, subclass) {
            Ok(report) => {
                info!(
                    character = self.character.name(),
                    level = report.level,
                    hp_gained = report.hp_gained,
                    features = ?report.features_granted,
                    "level up"
                );
                if let Some(recorded) = &report.subclass_recorded {
                    info!(character = self.character.name(), subclass = %recorded, "subclass chosen");
                }
                if report.subclass_ignored {
                    debug!(supplied = ?subclass, "supplied subclass ignored");
                }
                Ok(report)
            }
            Err(err) => Err(rejected("level up", err.into())),
        }
    }

    /// Records a subclass at the current level; see [`ProgressionEngine::choose_subclass`].
    pub fn choose_subclass(&mut self, subclass: &str) -> Result<bool> {
        let engine = ProgressionEngine::with_config(&self.catalog, &self.config);
        match engine.choose_subclass(&mut self.character, subclass) {
            Ok(recorded) => {
                if recorded {
                    info!(character = self.character.name(), subclass, "subclass chosen");
                }
                Ok(recorded)
            }
            Err(err) => Err(rejected("subclass choice", err.into())),
        }
    }

    // ===== equipment =====

    pub fn equip(&mut self, item: &InventoryItem, slot: EquipSlot) -> Result<EquipOutcome> {
        match self.equipment.equip(&self.character, item, slot) {
            Ok(outcome) => {
                info!(
                    item = %item.id,
                    %slot,
                    evicted = ?outcome.evicted.as_ref().map(|i| &i.id),
                    "item equipped"
                );
                self.log_totals();
                Ok(outcome)
            }
            Err(err) => Err(rejected("equip", err.into())),
        }
    }

    pub fn unequip(&mut self, slot: EquipSlot) -> Option<InventoryItem> {
        let removed = self.equipment.unequip(slot);
        if let Some(item) = &removed {
            info!(item = %item.id, %slot, "item unequipped");
            self.log_totals();
        }
        removed
    }

    pub fn swap(&mut self, a: EquipSlot, b: EquipSlot) -> Result<()> {
        self.equipment
            .swap(&self.character, a, b)
            .map_err(|err| rejected("swap", err.into()))?;
        info!(%a, %b, "slots swapped");
        Ok(())
    }

    pub fn auto_equip_best(&mut self, candidates: &[InventoryItem]) -> AutoEquipReport {
        let report = self.equipment.auto_equip_best(&self.character, candidates);
        for (slot, item) in &report.equipped {
            info!(item = %item, %slot, "item auto-equipped");
        }
        debug!(
            equipped = report.equipped.len(),
            skipped = report.skipped.len(),
            "auto-equip finished"
        );
        self.log_totals();
        report
    }

    pub fn total_stats(&self) -> StatBonuses {
        self.equipment.total_stats()
    }

    pub fn armor_class(&self) -> i32 {
        self.equipment.armor_class(&self.character)
    }

    // ===== character lifecycle =====

    /// Makes `next` the active character with an empty slot map.
    ///
    /// Returns the previous character together with everything it had
    /// equipped.
    pub fn switch_character(&mut self, next: Character) -> Result<(Character, EquipmentSlots)> {
        ensure_known_class(&self.catalog, &next)?;
        let previous_slots = self.equipment.rebuild_from(EquipmentSlots::empty());
        let previous = std::mem::replace(&mut self.character, next);
        info!(
            from = previous.name(),
            to = self.character.name(),
            "active character switched"
        );
        Ok((previous, previous_slots))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            character: self.character.clone(),
            equipment: self.equipment.slots().clone(),
        }
    }

    /// Replaces the session state with `snapshot`, returning the state it replaced.
    ///
    /// The slot map is taken as stored; the aggregate is recomputed from it.
    pub fn restore(&mut self, snapshot: SessionSnapshot) -> Result<SessionSnapshot> {
        ensure_known_class(&self.catalog, &snapshot.character)?;
        let equipment = self.equipment.rebuild_from(snapshot.equipment);
        let character = std::mem::replace(&mut self.character, snapshot.character);
        info!(
            character = self.character.name(),
            level = self.character.level(),
            "session restored"
        );
        self.log_totals();
        Ok(SessionSnapshot {
            character,
            equipment,
        })
    }

    fn progression(&self) -> ProgressionEngine<'_> {
        ProgressionEngine::with_config(&self.catalog, &self.config)
    }

    fn log_totals(&self) {
        debug!(
            totals = ?self.equipment.total_stats().iter().collect::<Vec<_>>(),
            armor_class = self.armor_class(),
            "equipment totals recomputed"
        );
    }
}

fn ensure_known_class(catalog: &ClassCatalog, character: &Character) -> Result<()> {
    if catalog.lookup(character.class_id().as_str()).is_none() {
        return Err(SessionError::UnknownClass {
            class: character.class_id().clone(),
        });
    }
    Ok(())
}

fn rejected(operation: &'static str, err: SessionError) -> SessionError {
    warn!(
        operation,
        code = err.error_code(),
        severity = err.severity().as_str(),
        error = %err,
        "operation rejected"
    );
    err
}

enum CharacterSource {
    Existing(Character),
    Template {
        name: String,
        class: ClassId,
        abilities: AbilityScores,
    },
}

/// Builder for [`Session`].
///
/// Content comes from, in order of preference: an explicit catalog, a data
/// directory read through [`ContentFactory`], or the built-in standard
/// catalog.
pub struct SessionBuilder {
    catalog: Option<Arc<ClassCatalog>>,
    data_dir: Option<PathBuf>,
    config: Option<RulesConfig>,
    character: Option<CharacterSource>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            catalog: None,
            data_dir: None,
            config: None,
            character: None,
        }
    }

    /// Use an already-built catalog.
    pub fn catalog(mut self, catalog: Arc<ClassCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load `classes.ron` (and `rules.toml` when present) from a directory.
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Override rules configuration
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resume an existing character.
    pub fn character(mut self, character: Character) -> Self {
        self.character = Some(CharacterSource::Existing(character));
        self
    }

    /// Create a fresh level-1 character of `class` at build time.
    pub fn new_character(
        mut self,
        name: impl Into<String>,
        class: impl Into<String>,
        abilities: AbilityScores,
    ) -> Self {
        self.character = Some(CharacterSource::Template {
            name: name.into(),
            class: ClassId::new(class),
            abilities,
        });
        self
    }

    pub fn build(self) -> Result<Session> {
        let source = self.character.ok_or(SessionError::MissingCharacter)?;

        let (catalog, loaded_config) = match (self.catalog, self.data_dir) {
            (Some(catalog), _) => (catalog, None),
            (None, Some(dir)) => {
                let factory = ContentFactory::new(dir);
                let config = match self.config {
                    Some(_) => None,
                    None => Some(factory.load_config()?),
                };
                (Arc::new(factory.load_classes()?), config)
            }
            (None, None) => {
                let config = match self.config {
                    Some(_) => None,
                    None => Some(builtin::standard_config()?),
                };
                (Arc::new(builtin::standard_catalog()?), config)
            }
        };
        let config = self.config.or(loaded_config).unwrap_or_default();

        let character = match source {
            CharacterSource::Existing(character) => character,
            CharacterSource::Template {
                name,
                class,
                abilities,
            } => {
                let definition = catalog
                    .lookup(class.as_str())
                    .ok_or(SessionError::UnknownClass { class: class.clone() })?;
                Character::from_template(name, definition, abilities)
            }
        };

        Session::new(catalog, config, character)
    }
}
