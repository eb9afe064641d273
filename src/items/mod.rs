//! Equipment, weapons, armor and consumables.

pub mod equipment;
pub mod potions;
pub mod types;

pub use equipment::Equipment;
pub use potions::{Potion, PotionEffect, PotionOutcome};
pub use types::*;
