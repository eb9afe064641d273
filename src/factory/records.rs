//! Plain data records, exactly as they appear in the JSON data files.
//!
//! Numbers are signed so that negative values survive parsing and can be
//! rejected with a validation error naming the record and field.

use serde::{Deserialize, Serialize};

fn default_speed() -> i64 {
    crate::core::constants::DEFAULT_SPEED as i64
}

fn default_level() -> i64 {
    1
}

fn default_uses() -> i64 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    #[serde(default)]
    pub strength: i64,
    #[serde(default)]
    pub intelligence: i64,
    #[serde(default)]
    pub defense: i64,
    #[serde(default)]
    pub dexterity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffRecord {
    pub name: String,
    pub stat: String,
    pub amount: i64,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoisonRecord {
    pub name: String,
    pub damage_per_turn: i64,
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub class: String,
    pub hp: i64,
    pub mana: i64,
    pub mana_per_attack: i64,
    #[serde(flatten)]
    pub stats: StatRecord,
    #[serde(default = "default_speed")]
    pub speed: i64,
    pub special_ability: BuffRecord,
    #[serde(default)]
    pub default_weapon: Option<String>,
    #[serde(default)]
    pub default_potions: Vec<String>,

    // Class-specific
    #[serde(default)]
    pub shield: i64,
    #[serde(default)]
    pub critical_bonus: i64,
    #[serde(default)]
    pub healing_per_attack: i64,
    #[serde(default, alias = "poison_mitigation")]
    pub poisons_mitigation: i64,
    #[serde(default)]
    pub buff_amount_boost: i64,
    #[serde(default)]
    pub buff_duration_boost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    pub weight: i64,
    #[serde(flatten)]
    pub stats: StatRecord,
    pub damage_range_min: i64,
    pub damage_range_max: i64,
    pub weapon_type: String,
    #[serde(default = "weapon_slot")]
    pub slot: String,
}

fn weapon_slot() -> String {
    "weapon".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorRecord {
    pub name: String,
    pub weight: i64,
    #[serde(flatten)]
    pub stats: StatRecord,
    pub slot: String,
    #[serde(default)]
    pub mitigation: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotionRecord {
    pub name: String,
    /// "heal" or "buff"
    pub kind: String,
    #[serde(default)]
    pub mana_consume: i64,
    #[serde(default = "default_uses")]
    pub uses: i64,
    #[serde(default)]
    pub healing_effect: Option<i64>,
    #[serde(default)]
    pub buff: Option<BuffRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub name: String,
    pub class: String,
    pub hp: i64,
    pub base_damage: i64,
    pub bonus_damage: i64,
    #[serde(default = "default_level")]
    pub level: i64,
    #[serde(default = "default_speed")]
    pub speed: i64,
    #[serde(flatten)]
    pub stats: StatRecord,
    /// Names of weapons or armor the monster starts with
    #[serde(default)]
    pub equipment: Vec<String>,

    // Class-specific
    #[serde(default)]
    pub buff_stole_per_turn: i64,
    #[serde(default)]
    pub brute_force: i64,
    #[serde(default)]
    pub poisons: Vec<PoisonRecord>,
    #[serde(default)]
    pub poison: Option<PoisonRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectileRecord {
    pub weapon: String,
    pub projectile_type: String,
    pub speed: i64,
    #[serde(default)]
    pub effect: Option<String>,
}

/// Every record kind, one list per data file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecords {
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
    #[serde(default)]
    pub weapons: Vec<WeaponRecord>,
    #[serde(default)]
    pub armor: Vec<ArmorRecord>,
    #[serde(default)]
    pub potions: Vec<PotionRecord>,
    #[serde(default)]
    pub monsters: Vec<MonsterRecord>,
    #[serde(default)]
    pub projectiles: Vec<ProjectileRecord>,
}
