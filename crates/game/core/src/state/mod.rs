//! Mutable rules state: the character and its equipped-slot map.
//!
//! Both are plain value objects. The session store owns and persists them;
//! the engines mutate them in place and never perform I/O.
mod character;
mod equipment;

pub use character::{AbilityScores, Character};
pub use equipment::{EquipSlot, EquipmentSlots};
