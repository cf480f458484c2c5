//! Equip-time validation errors.

use crate::catalog::ClassId;
use crate::error::{ErrorSeverity, RulesError};
use crate::item::ItemId;
use crate::state::EquipSlot;

/// Why an equip or swap was refused. The slot map is unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EquipError {
    #[error("{item} cannot be equipped")]
    NotEquippable { item: ItemId },

    #[error("{item} does not fit the {slot} slot")]
    SlotMismatch { item: ItemId, slot: EquipSlot },

    #[error("{item} requires level {required} (current level {current})")]
    LevelTooLow {
        item: ItemId,
        required: u32,
        current: u32,
    },

    #[error("{item} cannot be used by class '{class}'")]
    ClassNotAllowed { item: ItemId, class: ClassId },

    #[error("{item} needs both hands but the off hand is occupied")]
    OffHandOccupied { item: ItemId },

    #[error("the off hand is blocked by two-handed {two_hander}")]
    MainHandTwoHanded { two_hander: ItemId },
}

impl RulesError for EquipError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use EquipError::*;
        match self {
            NotEquippable { .. } => "EQUIP_NOT_EQUIPPABLE",
            SlotMismatch { .. } => "EQUIP_SLOT_MISMATCH",
            LevelTooLow { .. } => "EQUIP_LEVEL_TOO_LOW",
            ClassNotAllowed { .. } => "EQUIP_CLASS_NOT_ALLOWED",
            OffHandOccupied { .. } => "EQUIP_OFF_HAND_OCCUPIED",
            MainHandTwoHanded { .. } => "EQUIP_MAIN_HAND_TWO_HANDED",
        }
    }
}
