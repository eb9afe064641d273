//! Battle state machine.

pub mod logic;
pub mod types;

pub use logic::Battle;
pub use types::*;
