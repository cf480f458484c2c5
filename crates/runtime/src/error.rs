//! Unified error type surfaced by the session API.
//!
//! Wraps failures from the progression and equipment engines and from
//! content loading so callers can bubble them up with consistent context.

use rules_core::{ClassId, EquipError, ErrorSeverity, ProgressionError, RulesError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Equip(#[from] EquipError),

    #[error("class '{class}' is not in the session catalog")]
    UnknownClass { class: ClassId },

    #[error("session requires a character before building")]
    MissingCharacter,

    #[error(transparent)]
    Content(#[from] anyhow::Error),
}

impl RulesError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Progression(err) => err.severity(),
            Self::Equip(err) => err.severity(),
            Self::UnknownClass { .. } => ErrorSeverity::IllegalState,
            Self::MissingCharacter | Self::Content(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Progression(err) => err.error_code(),
            Self::Equip(err) => err.error_code(),
            Self::UnknownClass { .. } => "SESSION_UNKNOWN_CLASS",
            Self::MissingCharacter => "SESSION_MISSING_CHARACTER",
            Self::Content(_) => "SESSION_CONTENT",
        }
    }
}
