//! Timed status effects: stat buffs and damage-over-time poisons.
//!
//! Both carry a duration counted in rounds. The owning combatant folds a
//! buff into its stats when it is added and keeps the returned [`StatDelta`]
//! alongside it, so removal subtracts exactly what was added.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::character::stats::{StatDelta, StatType};
use crate::core::error::{require_name, GameError, GameResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buff {
    pub name: String,
    pub stat: StatType,
    pub amount: u32,
    pub duration: u32,
}

impl Buff {
    pub fn new(name: impl Into<String>, stat: StatType, amount: u32, duration: u32) -> GameResult<Self> {
        let name = name.into();
        require_name(&name, "buff name")?;
        if duration == 0 {
            return Err(GameError::validation(&name, "duration", "must be greater than 0"));
        }
        Ok(Self {
            name,
            stat,
            amount,
            duration,
        })
    }

    /// Returns a copy with amount and duration raised by the given boosts.
    pub fn amplified(&self, amount_boost: u32, duration_boost: u32) -> Buff {
        Buff {
            name: self.name.clone(),
            stat: self.stat,
            amount: self.amount.saturating_add(amount_boost),
            duration: self.duration.saturating_add(duration_boost),
        }
    }
}

impl fmt::Display for Buff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (+{} {} for {} rounds)",
            self.name, self.amount, self.stat, self.duration
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poison {
    pub name: String,
    pub damage_per_turn: u32,
    pub duration: u32,
}

impl Poison {
    pub fn new(name: impl Into<String>, damage_per_turn: u32, duration: u32) -> GameResult<Self> {
        let name = name.into();
        require_name(&name, "poison name")?;
        if damage_per_turn == 0 {
            return Err(GameError::validation(&name, "damage_per_turn", "must be greater than 0"));
        }
        if duration == 0 {
            return Err(GameError::validation(&name, "duration", "must be greater than 0"));
        }
        Ok(Self {
            name,
            damage_per_turn,
            duration,
        })
    }

    /// Multiplies damage (and optionally duration) by a monster level.
    pub fn scaled(&self, level: u32, scale_duration: bool) -> Poison {
        Poison {
            name: self.name.clone(),
            damage_per_turn: self.damage_per_turn.saturating_mul(level.max(1)),
            duration: if scale_duration {
                self.duration.saturating_mul(level.max(1))
            } else {
                self.duration
            },
        }
    }
}

impl fmt::Display for Poison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} damage per round for {} rounds)",
            self.name, self.damage_per_turn, self.duration
        )
    }
}

/// A buff currently folded into a combatant's stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub buff: Buff,
    pub remaining: u32,
    /// What was actually added to the stat block
    pub applied: StatDelta,
}

impl ActiveBuff {
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePoison {
    pub poison: Poison,
    pub remaining: u32,
}

impl ActivePoison {
    pub fn new(poison: Poison) -> Self {
        let remaining = poison.duration;
        Self { poison, remaining }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    /// Lowers damage per round by `amount`; returns true if the poison is neutralised.
    pub fn mitigate(&mut self, amount: u32) -> bool {
        self.poison.damage_per_turn = self.poison.damage_per_turn.saturating_sub(amount);
        self.poison.damage_per_turn == 0
    }
}
