//! Common error infrastructure for rules-core.
//!
//! This module provides shared types and traits used across all error types in rules-core.
//! Domain-specific errors (e.g., `ProgressionError`, `EquipError`) are defined in their
//! respective modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each engine has its own error type with specific variants
//! - **No Mutation on Failure**: Every error is returned before any state is touched
//! - **Severity Classification**: Errors are categorized so callers can present them inline
//!
//! Absence (unknown class, missing progression entry, empty slot) is never an
//! error here; lookups return `Option` or empty slices instead.

/// Severity level of an error, used for categorization and presentation.
///
/// - **Validation**: The request was checked and refused (slot mismatch, unmet requirement)
/// - **IllegalState**: The request cannot proceed from the character's current state
/// - **Internal**: Content data violates an invariant and should be fixed at the source
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation failure - the input was rejected, state unchanged.
    ///
    /// Examples: item affinity does not match slot, level requirement unmet
    Validation,

    /// Illegal state - the operation is not possible right now, state unchanged.
    ///
    /// Examples: no progression entry for the next level, missing subclass choice
    IllegalState,

    /// Internal error - content data is inconsistent.
    ///
    /// Examples: XP thresholds decreasing, granted feature not in the class list
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::IllegalState => "illegal_state",
            Self::Internal => "internal",
        }
    }

    /// Returns true if the caller may retry after changing its input.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation | Self::IllegalState)
    }

    /// Returns true if this error indicates broken content data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all rules-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl; the Display text
///   is the diagnostic shown to the player
/// - Codes are stable identifiers; diagnostics are not
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
