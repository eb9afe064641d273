use serde::{Deserialize, Serialize};

use crate::character::stats::StatBlock;
use crate::core::constants::DEFAULT_SPEED;
use crate::core::error::{require_name, GameError, GameResult};
use crate::effects::{ActiveBuff, ActivePoison, Buff, Poison};
use crate::items::equipment::Equipment;
use crate::items::potions::Potion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeroClass {
    /// Flat reduction applied after defense and armor
    Warrior { shield: u32 },
    Cleric {
        healing_per_attack: u32,
        poisons_mitigation: u32,
    },
    /// Extra damage on a critical roll
    Thief { critical_bonus: u32 },
    Wizard {
        buff_amount_boost: u32,
        buff_duration_boost: u32,
    },
}

impl HeroClass {
    pub fn name(&self) -> &'static str {
        match self {
            HeroClass::Warrior { .. } => "Warrior",
            HeroClass::Cleric { .. } => "Cleric",
            HeroClass::Thief { .. } => "Thief",
            HeroClass::Wizard { .. } => "Wizard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub class: HeroClass,
    pub mana: u32,
    pub mana_per_attack: u32,
    pub special_ability: Buff,
    pub used_special_ability: bool,
    pub potions: Vec<Potion>,
}

impl Hero {
    pub fn new(
        class: HeroClass,
        mana: u32,
        mana_per_attack: u32,
        special_ability: Buff,
    ) -> GameResult<Self> {
        if mana_per_attack == 0 {
            return Err(GameError::validation(
                class.name(),
                "mana_per_attack",
                "must be greater than 0",
            ));
        }
        Ok(Self {
            class,
            mana,
            mana_per_attack,
            special_ability,
            used_special_ability: false,
            potions: Vec::new(),
        })
    }

    pub fn with_potions(mut self, potions: Vec<Potion>) -> Self {
        self.potions = potions;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterClass {
    /// Removes up to this many of the target's buffs per attack
    Goblin { buff_stole_per_turn: u32 },
    /// Finite supply, one poison cast per attack
    Witch { poisons: Vec<Poison> },
    Zombie { can_revive: bool },
    /// Single poison, cast at most once on a chance roll
    Spider { poison: Poison, can_cast: bool },
    /// Damage multiplier
    Troll { brute_force: u32 },
}

impl MonsterClass {
    pub fn name(&self) -> &'static str {
        match self {
            MonsterClass::Goblin { .. } => "Goblin",
            MonsterClass::Witch { .. } => "Witch",
            MonsterClass::Zombie { .. } => "Zombie",
            MonsterClass::Spider { .. } => "Spider",
            MonsterClass::Troll { .. } => "Troll",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub class: MonsterClass,
    pub level: u32,
    pub base_damage: u32,
    pub bonus_damage: u32,
}

impl Monster {
    /// Builds a monster, scaling damage (and Witch/Spider poisons) by `level`.
    pub fn new(
        level: u32,
        base_damage: u32,
        bonus_damage: u32,
        class: MonsterClass,
    ) -> GameResult<Self> {
        let entity = class.name();
        if level == 0 {
            return Err(GameError::validation(entity, "level", "must be greater than 0"));
        }
        if base_damage == 0 {
            return Err(GameError::validation(
                entity,
                "base_damage",
                "must be greater than 0",
            ));
        }
        if bonus_damage == 0 {
            return Err(GameError::validation(
                entity,
                "bonus_damage",
                "must be greater than 0",
            ));
        }
        let class = match class {
            MonsterClass::Goblin {
                buff_stole_per_turn: 0,
            } => {
                return Err(GameError::validation(
                    entity,
                    "buff_stole_per_turn",
                    "must be greater than 0",
                ));
            }
            MonsterClass::Troll { brute_force: 0 } => {
                return Err(GameError::validation(
                    entity,
                    "brute_force",
                    "must be greater than 0",
                ));
            }
            MonsterClass::Witch { poisons } => MonsterClass::Witch {
                poisons: poisons.iter().map(|p| p.scaled(level, false)).collect(),
            },
            MonsterClass::Spider { poison, can_cast } => MonsterClass::Spider {
                poison: poison.scaled(level, true),
                can_cast,
            },
            other => other,
        };
        Ok(Self {
            class,
            level,
            base_damage: scale_by_level(entity, "base_damage", base_damage, level)?,
            bonus_damage: scale_by_level(entity, "bonus_damage", bonus_damage, level)?,
        })
    }
}

fn scale_by_level(entity: &str, field: &'static str, value: u32, level: u32) -> GameResult<u32> {
    value
        .checked_mul(level)
        .ok_or_else(|| GameError::validation(entity, field, "too large after level scaling"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatantKind {
    Hero(Hero),
    Monster(Monster),
}

/// A hero or monster taking part in a battle.
///
/// `max_hp` is fixed at construction and `hp` only moves through damage,
/// healing and revival, so `0 <= hp <= max_hp` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    pub(crate) name: String,
    pub(crate) hp: u32,
    pub(crate) max_hp: u32,
    pub(crate) base_stats: StatBlock,
    pub(crate) speed: u32,
    pub(crate) equipment: Equipment,
    pub(crate) buffs: Vec<ActiveBuff>,
    pub(crate) poisons: Vec<ActivePoison>,
    pub(crate) kind: CombatantKind,
}

impl Combatant {
    pub fn new_hero(
        name: impl Into<String>,
        hp: u32,
        base_stats: StatBlock,
        hero: Hero,
    ) -> GameResult<Self> {
        Self::validated(name.into(), hp, base_stats, CombatantKind::Hero(hero))
    }

    /// Builds a monster; `hp` is the level-1 value and is scaled by the monster's level.
    pub fn new_monster(
        name: impl Into<String>,
        hp: u32,
        base_stats: StatBlock,
        monster: Monster,
    ) -> GameResult<Self> {
        let name = name.into();
        let hp = scale_by_level(&name, "hp", hp, monster.level)?;
        Self::validated(name, hp, base_stats, CombatantKind::Monster(monster))
    }

    fn validated(
        name: String,
        hp: u32,
        base_stats: StatBlock,
        kind: CombatantKind,
    ) -> GameResult<Self> {
        require_name(&name, "name")?;
        if hp == 0 {
            return Err(GameError::validation(&name, "hp", "must be greater than 0"));
        }
        Ok(Self {
            name,
            hp,
            max_hp: hp,
            base_stats,
            speed: DEFAULT_SPEED,
            equipment: Equipment::new(),
            buffs: Vec::new(),
            poisons: Vec::new(),
            kind,
        })
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    /// Current stats, including equipment bonuses and active buffs.
    pub fn stats(&self) -> &StatBlock {
        &self.base_stats
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn active_buffs(&self) -> &[ActiveBuff] {
        &self.buffs
    }

    pub fn active_poisons(&self) -> &[ActivePoison] {
        &self.poisons
    }

    pub fn kind(&self) -> &CombatantKind {
        &self.kind
    }

    pub fn hero(&self) -> Option<&Hero> {
        match &self.kind {
            CombatantKind::Hero(hero) => Some(hero),
            CombatantKind::Monster(_) => None,
        }
    }

    pub(crate) fn hero_mut(&mut self) -> Option<&mut Hero> {
        match &mut self.kind {
            CombatantKind::Hero(hero) => Some(hero),
            CombatantKind::Monster(_) => None,
        }
    }

    pub fn monster(&self) -> Option<&Monster> {
        match &self.kind {
            CombatantKind::Monster(monster) => Some(monster),
            CombatantKind::Hero(_) => None,
        }
    }

    pub(crate) fn monster_mut(&mut self) -> Option<&mut Monster> {
        match &mut self.kind {
            CombatantKind::Monster(monster) => Some(monster),
            CombatantKind::Hero(_) => None,
        }
    }

    /// Hero mana, 0 for monsters.
    pub fn mana(&self) -> u32 {
        self.hero().map_or(0, |h| h.mana)
    }

    pub fn potions(&self) -> &[Potion] {
        self.hero()
            .map(|h| h.potions.as_slice())
            .unwrap_or_default()
    }

    pub fn class_name(&self) -> &'static str {
        match &self.kind {
            CombatantKind::Hero(hero) => hero.class.name(),
            CombatantKind::Monster(monster) => monster.class.name(),
        }
    }
}

/// Result of a single attack, reported back to the battle engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackOutcome {
    /// Damage rolled by the attacker before the target's mitigation
    pub damage: u32,
    /// HP the target actually lost
    pub damage_dealt: u32,
    /// False when the attack was a soft-fail (insufficient mana)
    pub performed: bool,
    pub critical: bool,
    pub healed: u32,
    pub poison_applied: Option<String>,
    pub buffs_stolen: Vec<String>,
    pub target_revived: bool,
}
