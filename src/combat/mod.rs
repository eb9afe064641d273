//! Combatants and the attack contract.

pub mod logic;
pub mod motion;
pub mod types;

pub use logic::RoundEffects;
pub use motion::{AttackMotion, MotionPhase, Projectile, ProjectileFlight};
pub use types::*;
