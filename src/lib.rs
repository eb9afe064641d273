//! Arena - Turn-Based Combat Engine Library
//!
//! A hero picked from a roster fights a pool of monsters one at a time.
//! Combat math lives on [`combat::Combatant`]; [`battle::Battle`] drives
//! turns, attack timing and respawns; [`factory::GameData`] builds the
//! roster and the monster pool from JSON data files.

pub mod battle;
pub mod character;
pub mod combat;
pub mod core;
pub mod effects;
pub mod factory;
pub mod items;

pub use crate::battle::{Battle, BattleEvent, BattleOutcome, BattlePhase, PlayerAction, Turn};
pub use crate::combat::Combatant;
pub use crate::core::{BattleConfig, GameError, GameResult};
pub use crate::factory::GameData;
