use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NUM_STATS: usize = 4;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StatType {
    Strength,
    Intelligence,
    Defense,
    Dexterity,
}

impl StatType {
    pub fn all() -> [StatType; NUM_STATS] {
        [
            StatType::Strength,
            StatType::Intelligence,
            StatType::Defense,
            StatType::Dexterity,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatType::Strength => "strength",
            StatType::Intelligence => "intelligence",
            StatType::Defense => "defense",
            StatType::Dexterity => "dexterity",
        }
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Strength => "STR",
            StatType::Intelligence => "INT",
            StatType::Defense => "DEF",
            StatType::Dexterity => "DEX",
        }
    }
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strength" => Ok(StatType::Strength),
            "intelligence" => Ok(StatType::Intelligence),
            "defense" => Ok(StatType::Defense),
            "dexterity" => Ok(StatType::Dexterity),
            other => Err(format!("'{}' is not a stat", other)),
        }
    }
}

/// Four non-negative attributes. Arithmetic produces new values; subtraction
/// clamps each field at zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatBlock {
    pub strength: u32,
    pub intelligence: u32,
    pub defense: u32,
    pub dexterity: u32,
}

/// Exact amount a buff added to one stat, kept so it can be taken back out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatDelta {
    pub stat: StatType,
    pub amount: u32,
}

impl StatBlock {
    pub fn new(strength: u32, intelligence: u32, defense: u32, dexterity: u32) -> Self {
        Self {
            strength,
            intelligence,
            defense,
            dexterity,
        }
    }

    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::Strength => self.strength,
            StatType::Intelligence => self.intelligence,
            StatType::Defense => self.defense,
            StatType::Dexterity => self.dexterity,
        }
    }

    pub fn set(&mut self, stat: StatType, value: u32) {
        match stat {
            StatType::Strength => self.strength = value,
            StatType::Intelligence => self.intelligence = value,
            StatType::Defense => self.defense = value,
            StatType::Dexterity => self.dexterity = value,
        }
    }

    pub fn add(&self, other: &StatBlock) -> StatBlock {
        let mut out = *self;
        for stat in StatType::all() {
            out.set(stat, self.get(stat).saturating_add(other.get(stat)));
        }
        out
    }

    pub fn subtract(&self, other: &StatBlock) -> StatBlock {
        let mut out = *self;
        for stat in StatType::all() {
            out.set(stat, self.get(stat).saturating_sub(other.get(stat)));
        }
        out
    }

    /// Folds `amount` into one stat and returns the ledger entry that undoes it.
    pub fn apply_delta(&mut self, stat: StatType, amount: u32) -> StatDelta {
        let before = self.get(stat);
        let after = before.saturating_add(amount);
        self.set(stat, after);
        StatDelta {
            stat,
            amount: after - before,
        }
    }

    pub fn revert_delta(&mut self, delta: StatDelta) {
        let current = self.get(delta.stat);
        self.set(delta.stat, current.saturating_sub(delta.amount));
    }

    pub fn total(&self) -> u32 {
        StatType::all()
            .into_iter()
            .fold(0u32, |acc, stat| acc.saturating_add(self.get(stat)))
    }
}

impl fmt::Display for StatBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STR {} INT {} DEF {} DEX {}",
            self.strength, self.intelligence, self.defense, self.dexterity
        )
    }
}
