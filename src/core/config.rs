//! Battle timing configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::*;
use crate::core::error::GameResult;

/// Timer thresholds and stage geometry used by the battle engine.
///
/// Every field has a default, so a config file only needs to list the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seconds between reaching range and the attack resolving
    pub attack_duration_secs: f64,

    /// Seconds a melee attacker spends walking back after resolving
    pub return_duration_secs: f64,

    /// Seconds the enemy waits at the start of its turn
    pub enemy_think_delay_secs: f64,

    /// Seconds between an enemy's defeat and the next enemy entering
    pub respawn_delay_secs: f64,

    /// Distance a melee attacker covers before the attack window opens
    pub approach_distance: f64,

    /// Stage units per second per point of combatant speed
    pub approach_speed_scale: f64,

    /// Distance a projectile travels from attacker to target
    pub projectile_distance: f64,

    /// Optional cap on rounds per encounter (None = unlimited)
    pub max_rounds_per_encounter: Option<u32>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            attack_duration_secs: ATTACK_DURATION_SECONDS,
            return_duration_secs: RETURN_DURATION_SECONDS,
            enemy_think_delay_secs: ENEMY_THINK_DELAY_SECONDS,
            respawn_delay_secs: ENEMY_RESPAWN_SECONDS,
            approach_distance: APPROACH_DISTANCE,
            approach_speed_scale: APPROACH_SPEED_SCALE,
            projectile_distance: PROJECTILE_DISTANCE,
            max_rounds_per_encounter: None,
        }
    }
}

impl BattleConfig {
    pub fn from_toml_str(source: &str) -> GameResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Instant timers, for tests and headless runs that only care about outcomes.
    pub fn instant() -> Self {
        Self {
            attack_duration_secs: 0.0,
            return_duration_secs: 0.0,
            enemy_think_delay_secs: 0.0,
            respawn_delay_secs: 0.0,
            approach_distance: 0.0,
            projectile_distance: 0.0,
            ..Default::default()
        }
    }

    /// Seconds a combatant with the given speed needs to close to melee range.
    pub fn approach_secs(&self, speed: u32) -> f64 {
        let units_per_sec = speed.max(1) as f64 * self.approach_speed_scale;
        if units_per_sec <= 0.0 {
            return 0.0;
        }
        self.approach_distance / units_per_sec
    }

    /// Seconds a projectile with the given speed spends in flight.
    pub fn projectile_flight_secs(&self, speed: u32) -> f64 {
        self.projectile_distance / speed.max(1) as f64
    }
}
