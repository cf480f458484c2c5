//! Content validation errors for class definitions.

use crate::catalog::ClassId;
use crate::error::{ErrorSeverity, RulesError};

/// A class definition that breaks a leveling-table invariant.
///
/// Raised only by [`ClassDefinition::validate`](super::ClassDefinition::validate);
/// registering an unvalidated definition is always allowed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("class {class}: progression table is empty")]
    EmptyProgression { class: ClassId },

    #[error("class {class}: hit die must be positive")]
    ZeroHitDie { class: ClassId },

    #[error("class {class}: expected level {expected} but found level {found}")]
    NonContiguousLevels {
        class: ClassId,
        expected: u32,
        found: u32,
    },

    #[error("class {class}: level {level} requires {xp_required} XP, less than the previous level")]
    DecreasingThreshold {
        class: ClassId,
        level: u32,
        xp_required: u64,
    },

    #[error("class {class}: level {level} grants unknown feature '{feature}'")]
    UnknownFeature {
        class: ClassId,
        level: u32,
        feature: String,
    },

    #[error("class {class}: subclass choice flag at level {level} disagrees with designated level {designated:?}")]
    SubclassLevelMismatch {
        class: ClassId,
        level: u32,
        designated: Option<u32>,
    },

    #[error("class {class}: subclass choice level set without any subclass options")]
    NoSubclassOptions { class: ClassId },

    #[error("class {class}: level {level} defines spell slots for a non-spellcaster")]
    SlotsOnNonCaster { class: ClassId, level: u32 },
}

impl RulesError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            EmptyProgression { .. } => "CATALOG_EMPTY_PROGRESSION",
            ZeroHitDie { .. } => "CATALOG_ZERO_HIT_DIE",
            NonContiguousLevels { .. } => "CATALOG_NON_CONTIGUOUS_LEVELS",
            DecreasingThreshold { .. } => "CATALOG_DECREASING_THRESHOLD",
            UnknownFeature { .. } => "CATALOG_UNKNOWN_FEATURE",
            SubclassLevelMismatch { .. } => "CATALOG_SUBCLASS_LEVEL_MISMATCH",
            NoSubclassOptions { .. } => "CATALOG_NO_SUBCLASS_OPTIONS",
            SlotsOnNonCaster { .. } => "CATALOG_SLOTS_ON_NON_CASTER",
        }
    }
}
