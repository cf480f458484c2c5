//! Level-up resolution errors.

use crate::catalog::ClassId;
use crate::error::{ErrorSeverity, RulesError};

/// Reasons a level-up could not be resolved. The character is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("class '{class}' is not in the catalog")]
    UnknownClass { class: ClassId },

    #[error("class '{class}' has no progression data for level {level}")]
    NoProgressionEntry { class: ClassId, level: u32 },

    #[error("level {level} requires {required} XP but only {current} XP is stored")]
    InsufficientExperience {
        level: u32,
        required: u64,
        current: u64,
    },

    #[error("level {level} of class '{class}' requires choosing a subclass")]
    MissingSubclassChoice { class: ClassId, level: u32 },

    #[error("class '{class}' does not choose a subclass at level {level}")]
    NotAtChoiceLevel { class: ClassId, level: u32 },

    #[error("'{subclass}' is not a subclass of '{class}'")]
    UnknownSubclass { class: ClassId, subclass: String },
}

impl RulesError for ProgressionError {
    fn severity(&self) -> ErrorSeverity {
        use ProgressionError::*;
        match self {
            UnknownSubclass { .. } => ErrorSeverity::Validation,
            UnknownClass { .. }
            | NoProgressionEntry { .. }
            | InsufficientExperience { .. }
            | MissingSubclassChoice { .. }
            | NotAtChoiceLevel { .. } => ErrorSeverity::IllegalState,
        }
    }

    fn error_code(&self) -> &'static str {
        use ProgressionError::*;
        match self {
            UnknownClass { .. } => "PROGRESSION_UNKNOWN_CLASS",
            NoProgressionEntry { .. } => "PROGRESSION_NO_ENTRY",
            InsufficientExperience { .. } => "PROGRESSION_INSUFFICIENT_XP",
            MissingSubclassChoice { .. } => "PROGRESSION_MISSING_SUBCLASS",
            NotAtChoiceLevel { .. } => "PROGRESSION_NOT_AT_CHOICE_LEVEL",
            UnknownSubclass { .. } => "PROGRESSION_UNKNOWN_SUBCLASS",
        }
    }
}
