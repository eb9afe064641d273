use serde::{Deserialize, Serialize};
use std::fmt;

use crate::combat::types::AttackOutcome;
use crate::items::potions::PotionOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Every monster in the pool was defeated
    Victory,
    /// The hero fell
    Defeat,
    /// The per-encounter round cap was reached
    Stalemate,
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BattleOutcome::Victory => "victory",
            BattleOutcome::Defeat => "defeat",
            BattleOutcome::Stalemate => "stalemate",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    CharacterSelect,
    Active,
    EnemyDefeatedPendingRespawn,
    GameOver(BattleOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Enemy,
}

impl Turn {
    pub fn other(self) -> Turn {
        match self {
            Turn::Player => Turn::Enemy,
            Turn::Enemy => Turn::Player,
        }
    }
}

/// A player intent, as forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    UsePotion(usize),
    SpecialAbility,
}

/// Something that happened during a battle update, for the presentation
/// layer to animate.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    HeroSelected {
        name: String,
    },
    EnemySpawned {
        name: String,
        class: &'static str,
    },
    AttackStarted {
        attacker: String,
        ranged: bool,
    },
    ProjectileLaunched {
        projectile_type: String,
        flight_secs: f64,
    },
    AttackResolved {
        attacker: String,
        target: String,
        outcome: AttackOutcome,
    },
    PotionUsed {
        potion: String,
        outcome: PotionOutcome,
    },
    PotionsDepleted {
        names: Vec<String>,
    },
    SpecialAbilityUsed {
        buff: String,
    },
    PoisonTicked {
        target: String,
        damage: u32,
    },
    BuffsExpired {
        target: String,
        names: Vec<String>,
    },
    TurnChanged(Turn),
    RoundEnded {
        round: u32,
    },
    EnemyDefeated {
        name: String,
    },
    ItemDropped {
        item: String,
        equipped: bool,
    },
    GameOver(BattleOutcome),
}
