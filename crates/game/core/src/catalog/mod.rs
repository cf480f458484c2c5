//! Class catalog: the immutable table of class definitions.
//!
//! The catalog is constructed explicitly (no global instance) and passed by
//! reference to the [`ProgressionEngine`](crate::progression::ProgressionEngine).
//! Every query treats absence as a normal outcome: unknown classes and levels
//! beyond the populated table yield `None` or an empty slice.
mod class;
mod error;
mod progression;

use std::collections::BTreeMap;

pub use class::{ClassDefinition, ClassDefinitionBuilder, ClassId};
pub use error::CatalogError;
pub use progression::{ProgressionEntry, SpellSlots};

/// In-memory class table keyed by class id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassCatalog {
    classes: BTreeMap<ClassId, ClassDefinition>,
}

impl ClassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `definition`, replacing any definition with the same id.
    ///
    /// Returns the replaced definition, if any. Last write wins.
    pub fn register(&mut self, definition: ClassDefinition) -> Option<ClassDefinition> {
        self.classes.insert(definition.id.clone(), definition)
    }

    pub fn lookup(&self, class_id: &str) -> Option<&ClassDefinition> {
        self.classes.get(class_id)
    }

    /// Returns the progression entry for `level`, or `None` when the class is
    /// unknown or the level lies outside its populated table.
    pub fn progression_entry(&self, class_id: &str, level: u32) -> Option<&ProgressionEntry> {
        self.lookup(class_id)?.entry(level)
    }

    /// Features granted at `level`; empty if the class or level is unknown.
    pub fn features_at_level(&self, class_id: &str, level: u32) -> &[String] {
        self.progression_entry(class_id, level)
            .map(|entry| entry.features.as_slice())
            .unwrap_or_default()
    }

    pub fn subclass_choice_level(&self, class_id: &str) -> Option<u32> {
        self.lookup(class_id)?.subclass_level
    }

    pub fn subclass_options(&self, class_id: &str) -> &[String] {
        self.lookup(class_id)
            .map(|class| class.subclasses.as_slice())
            .unwrap_or_default()
    }

    pub fn max_level(&self, class_id: &str) -> Option<u32> {
        self.lookup(class_id).map(ClassDefinition::max_level)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterates over definitions ordered by class id.
    pub fn iter(&self) -> impl Iterator<Item = &ClassDefinition> {
        self.classes.values()
    }
}

impl FromIterator<ClassDefinition> for ClassCatalog {
    fn from_iter<T: IntoIterator<Item = ClassDefinition>>(iter: T) -> Self {
        let mut catalog = Self::new();
        catalog.extend(iter);
        catalog
    }
}

impl Extend<ClassDefinition> for ClassCatalog {
    fn extend<T: IntoIterator<Item = ClassDefinition>>(&mut self, iter: T) {
        for definition in iter {
            self.register(definition);
        }
    }
}
