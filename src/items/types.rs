use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::character::stats::StatBlock;
use crate::core::error::{require_name, GameError, GameResult};

pub const NUM_SLOTS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Head,
    Chest,
    Legs,
    Feet,
    Hands,
    Shoulder,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; NUM_SLOTS] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Head,
            EquipmentSlot::Chest,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::Hands,
            EquipmentSlot::Shoulder,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            EquipmentSlot::Weapon => 0,
            EquipmentSlot::Head => 1,
            EquipmentSlot::Chest => 2,
            EquipmentSlot::Legs => 3,
            EquipmentSlot::Feet => 4,
            EquipmentSlot::Hands => 5,
            EquipmentSlot::Shoulder => 6,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Head => "head",
            EquipmentSlot::Chest => "chest",
            EquipmentSlot::Legs => "legs",
            EquipmentSlot::Feet => "feet",
            EquipmentSlot::Hands => "hands",
            EquipmentSlot::Shoulder => "shoulder",
        }
    }

    pub fn is_weapon_slot(&self) -> bool {
        matches!(self, EquipmentSlot::Weapon)
    }

    pub fn is_armor_slot(&self) -> bool {
        !self.is_weapon_slot()
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        EquipmentSlot::all()
            .into_iter()
            .find(|slot| slot.name() == wanted)
            .ok_or_else(|| format!("'{}' is not an equipment slot", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponType {
    Melee,
    Ranged,
}

impl FromStr for WeaponType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "melee" => Ok(WeaponType::Melee),
            "ranged" => Ok(WeaponType::Ranged),
            other => Err(format!("'{}' is not a weapon type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub damage_min: u32,
    pub damage_max: u32,
    pub weapon_type: WeaponType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorProfile {
    pub mitigation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(WeaponProfile),
    Armor(ArmorProfile),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub weight: u32,
    pub bonus_stats: StatBlock,
    pub slot: EquipmentSlot,
    pub kind: ItemKind,
}

impl Item {
    /// Builds a weapon, validating the damage range and slot.
    pub fn weapon(
        name: impl Into<String>,
        weight: u32,
        bonus_stats: StatBlock,
        damage_range: (u32, u32),
        weapon_type: WeaponType,
        slot: EquipmentSlot,
    ) -> GameResult<Self> {
        let name = name.into();
        require_name(&name, "name")?;
        let (damage_min, damage_max) = damage_range;
        if damage_min > damage_max {
            return Err(GameError::validation(
                &name,
                "damage_range",
                format!("min {} exceeds max {}", damage_min, damage_max),
            ));
        }
        if !slot.is_weapon_slot() {
            return Err(GameError::validation(
                &name,
                "slot",
                format!("{} is not a weapon slot", slot),
            ));
        }
        Ok(Self {
            name,
            weight,
            bonus_stats,
            slot,
            kind: ItemKind::Weapon(WeaponProfile {
                damage_min,
                damage_max,
                weapon_type,
            }),
        })
    }

    /// Builds an armor piece, validating the slot.
    pub fn armor(
        name: impl Into<String>,
        weight: u32,
        bonus_stats: StatBlock,
        slot: EquipmentSlot,
        mitigation: u32,
    ) -> GameResult<Self> {
        let name = name.into();
        require_name(&name, "name")?;
        if !slot.is_armor_slot() {
            return Err(GameError::validation(
                &name,
                "slot",
                format!("{} is not an armor slot", slot),
            ));
        }
        Ok(Self {
            name,
            weight,
            bonus_stats,
            slot,
            kind: ItemKind::Armor(ArmorProfile { mitigation }),
        })
    }

    pub fn weapon_profile(&self) -> Option<&WeaponProfile> {
        match &self.kind {
            ItemKind::Weapon(profile) => Some(profile),
            ItemKind::Armor(_) => None,
        }
    }

    pub fn mitigation(&self) -> u32 {
        match &self.kind {
            ItemKind::Armor(profile) => profile.mitigation,
            ItemKind::Weapon(_) => 0,
        }
    }

    pub fn is_ranged(&self) -> bool {
        self.weapon_profile()
            .is_some_and(|w| w.weapon_type == WeaponType::Ranged)
    }
}
