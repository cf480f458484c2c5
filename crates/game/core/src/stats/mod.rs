//! Stat vocabulary and bonus aggregation.
//!
//! Item stat bonuses use a closed vocabulary ([`StatKind`]) with one amount
//! per kind ([`StatBonuses`]). Keys outside the vocabulary never reach the
//! engines: data loaders parse names through [`StatBonuses::from_named`],
//! which drops and reports anything unknown.

pub mod bonus;
pub mod kind;

pub use bonus::StatBonuses;
pub use kind::StatKind;
