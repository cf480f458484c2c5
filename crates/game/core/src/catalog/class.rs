use core::borrow::Borrow;
use core::fmt;

use super::{CatalogError, ProgressionEntry};

/// Identifier of a class definition (e.g. `"fighter"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ClassId(pub String);

impl ClassId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ClassId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClassId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Immutable description of a character class and its leveling table.
///
/// Definitions are plain data assembled once at startup and owned by the
/// [`ClassCatalog`](super::ClassCatalog).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDefinition {
    pub id: ClassId,
    pub name: String,

    /// Hit die size; also the starting hit points at level 1.
    pub hit_die: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub spellcaster: bool,

    /// Subclass options in presentation order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub subclasses: Vec<String>,

    /// Level at which a subclass must be chosen.
    #[cfg_attr(feature = "serde", serde(default))]
    pub subclass_level: Option<u32>,

    /// Every feature the class can grant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub features: Vec<String>,

    /// Leveling table, one entry per level starting at 1.
    pub progression: Vec<ProgressionEntry>,
}

impl ClassDefinition {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ClassDefinitionBuilder {
        ClassDefinitionBuilder::new(id, name)
    }

    pub fn entry(&self, level: u32) -> Option<&ProgressionEntry> {
        self.progression.iter().find(|entry| entry.level == level)
    }

    /// Highest level with a progression entry.
    pub fn max_level(&self) -> u32 {
        self.progression
            .iter()
            .map(|entry| entry.level)
            .max()
            .unwrap_or(0)
    }

    /// Returns true if reaching `level` requires choosing a subclass.
    pub fn is_subclass_choice(&self, level: u32) -> bool {
        self.subclass_level == Some(level)
            || self.entry(level).is_some_and(|entry| entry.subclass_choice)
    }

    pub fn has_subclass(&self, subclass: &str) -> bool {
        self.subclasses.iter().any(|option| option == subclass)
    }

    /// Checks the leveling-table invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: levels must run 1, 2, 3… without
    /// gaps, XP thresholds must not decrease, granted features must belong to
    /// the class feature list, subclass-choice flags must agree with
    /// `subclass_level`, and only spellcasters may carry spell-slot tables.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let class = || self.id.clone();

        if self.hit_die == 0 {
            return Err(CatalogError::ZeroHitDie { class: class() });
        }
        if self.progression.is_empty() {
            return Err(CatalogError::EmptyProgression { class: class() });
        }
        if self.subclass_level.is_some() && self.subclasses.is_empty() {
            return Err(CatalogError::NoSubclassOptions { class: class() });
        }

        let mut previous_xp = 0;
        for (index, entry) in self.progression.iter().enumerate() {
            let expected = index as u32 + 1;
            if entry.level != expected {
                return Err(CatalogError::NonContiguousLevels {
                    class: class(),
                    expected,
                    found: entry.level,
                });
            }
            if entry.xp_required < previous_xp {
                return Err(CatalogError::DecreasingThreshold {
                    class: class(),
                    level: entry.level,
                    xp_required: entry.xp_required,
                });
            }
            previous_xp = entry.xp_required;

            if let Some(feature) = entry
                .features
                .iter()
                .find(|feature| !self.features.contains(feature))
            {
                return Err(CatalogError::UnknownFeature {
                    class: class(),
                    level: entry.level,
                    feature: feature.clone(),
                });
            }

            let designated = self.subclass_level == Some(entry.level);
            if entry.subclass_choice != designated {
                return Err(CatalogError::SubclassLevelMismatch {
                    class: class(),
                    level: entry.level,
                    designated: self.subclass_level,
                });
            }

            if entry.spell_slots.is_some() && !self.spellcaster {
                return Err(CatalogError::SlotsOnNonCaster {
                    class: class(),
                    level: entry.level,
                });
            }
        }

        Ok(())
    }
}

/// Builder for constructing class definitions in code.
///
/// Entries flagged with [`ProgressionEntry::with_subclass_choice`] are kept
/// as given; `subclasses` sets the designated level and flags the matching
/// entry at build time.
pub struct ClassDefinitionBuilder {
    id: ClassId,
    name: String,
    hit_die: u32,
    spellcaster: bool,
    subclasses: Vec<String>,
    subclass_level: Option<u32>,
    features: Vec<String>,
    progression: Vec<ProgressionEntry>,
}

impl ClassDefinitionBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ClassId::new(id),
            name: name.into(),
            hit_die: 8,
            spellcaster: false,
            subclasses: Vec::new(),
            subclass_level: None,
            features: Vec::new(),
            progression: Vec::new(),
        }
    }

    pub fn hit_die(mut self, hit_die: u32) -> Self {
        self.hit_die = hit_die;
        self
    }

    pub fn spellcaster(mut self) -> Self {
        self.spellcaster = true;
        self
    }

    pub fn subclasses<I, S>(mut self, level: u32, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subclass_level = Some(level);
        self.subclasses = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features.extend(features.into_iter().map(Into::into));
        self
    }

    pub fn level(mut self, entry: ProgressionEntry) -> Self {
        self.progression.push(entry);
        self
    }

    pub fn build(mut self) -> ClassDefinition {
        self.progression.sort_by_key(|entry| entry.level);
        if let Some(level) = self.subclass_level {
            for entry in self.progression.iter_mut().filter(|e| e.level == level) {
                entry.subclass_choice = true;
            }
        }

        ClassDefinition {
            id: self.id,
            name: self.name,
            hit_die: self.hit_die,
            spellcaster: self.spellcaster,
            subclasses: self.subclasses,
            subclass_level: self.subclass_level,
            features: self.features,
            progression: self.progression,
        }
    }
}
