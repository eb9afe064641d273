//! Shared tunables, configuration and error types.

pub mod config;
pub mod constants;
pub mod error;

pub use config::BattleConfig;
pub use error::{GameError, GameResult};
