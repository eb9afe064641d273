//! Combatant attributes.

pub mod stats;

pub use stats::*;
