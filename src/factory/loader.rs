//! Loads the JSON data directory and assembles the hero roster and
//! monster pool.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use super::build::*;
use super::records::{CharacterRecord, DataRecords, MonsterRecord};
use crate::battle::Battle;
use crate::combat::motion::Projectile;
use crate::combat::types::Combatant;
use crate::core::config::BattleConfig;
use crate::core::error::{GameError, GameResult};
use crate::items::potions::Potion;
use crate::items::types::Item;

pub const CHARACTERS_FILE: &str = "characters.json";
pub const WEAPONS_FILE: &str = "weapons.json";
pub const ARMOR_FILE: &str = "armor.json";
pub const POTIONS_FILE: &str = "potions.json";
pub const MONSTERS_FILE: &str = "monsters.json";
pub const PROJECTILES_FILE: &str = "projectiles.json";

/// Every entity built from the data files, with hero defaults resolved.
#[derive(Debug, Clone)]
pub struct GameData {
    heroes: Vec<Combatant>,
    monsters: Vec<Combatant>,
    weapons: Vec<Item>,
    armor: Vec<Item>,
    potions: Vec<Potion>,
    projectiles: Vec<Projectile>,
}

fn read_records<T: DeserializeOwned>(dir: &Path, file: &str, required: bool) -> GameResult<Vec<T>> {
    let path = dir.join(file);
    if !required && !path.exists() {
        debug!(file, "optional data file missing");
        return Ok(Vec::new());
    }
    let source = std::fs::read_to_string(&path)?;
    let records: Vec<T> = serde_json::from_str(&source)?;
    debug!(file, count = records.len(), "data file read");
    Ok(records)
}

impl GameData {
    /// Reads every data file in `dir`. Characters, weapons and monsters are
    /// required; armor, potions and projectiles may be absent.
    pub fn load_dir(dir: impl AsRef<Path>) -> GameResult<Self> {
        let dir = dir.as_ref();
        let records = DataRecords {
            characters: read_records(dir, CHARACTERS_FILE, true)?,
            weapons: read_records(dir, WEAPONS_FILE, true)?,
            armor: read_records(dir, ARMOR_FILE, false)?,
            potions: read_records(dir, POTIONS_FILE, false)?,
            monsters: read_records(dir, MONSTERS_FILE, true)?,
            projectiles: read_records(dir, PROJECTILES_FILE, false)?,
        };
        Self::from_records(&records)
    }

    /// Builds every entity, failing on the first invalid record.
    pub fn from_records(records: &DataRecords) -> GameResult<Self> {
        let weapons = records
            .weapons
            .iter()
            .map(create_weapon)
            .collect::<GameResult<Vec<_>>>()?;
        let armor = records
            .armor
            .iter()
            .map(create_armor)
            .collect::<GameResult<Vec<_>>>()?;
        let potions = records
            .potions
            .iter()
            .map(create_potion)
            .collect::<GameResult<Vec<_>>>()?;
        let projectiles = records
            .projectiles
            .iter()
            .map(create_projectile)
            .collect::<GameResult<Vec<_>>>()?;

        let mut data = Self {
            heroes: Vec::new(),
            monsters: Vec::new(),
            weapons,
            armor,
            potions,
            projectiles,
        };
        data.heroes = records
            .characters
            .iter()
            .map(|record| data.build_hero(record))
            .collect::<GameResult<Vec<_>>>()?;
        data.monsters = records
            .monsters
            .iter()
            .map(|record| data.build_monster(record))
            .collect::<GameResult<Vec<_>>>()?;
        info!(
            heroes = data.heroes.len(),
            monsters = data.monsters.len(),
            items = data.weapons.len() + data.armor.len(),
            potions = data.potions.len(),
            "game data loaded"
        );
        Ok(data)
    }

    fn build_hero(&self, record: &CharacterRecord) -> GameResult<Combatant> {
        let potions = record
            .default_potions
            .iter()
            .map(|name| {
                self.find_potion(name)
                    .cloned()
                    .ok_or_else(|| GameError::UnknownReference {
                        record: record.name.clone(),
                        field: "default_potions",
                        name: name.clone(),
                    })
            })
            .collect::<GameResult<Vec<_>>>()?;

        let mut hero = create_character(record)?;
        if let Some(profile) = hero.hero_mut() {
            profile.potions = potions;
        }
        if let Some(weapon_name) = &record.default_weapon {
            let weapon = self.find_item(weapon_name).cloned().ok_or_else(|| {
                GameError::UnknownReference {
                    record: record.name.clone(),
                    field: "default_weapon",
                    name: weapon_name.clone(),
                }
            })?;
            hero.equip(weapon)?;
        }
        Ok(hero)
    }

    fn build_monster(&self, record: &MonsterRecord) -> GameResult<Combatant> {
        let mut monster = create_monster(record)?;
        for item_name in &record.equipment {
            let item = self.find_item(item_name).cloned().ok_or_else(|| {
                GameError::UnknownReference {
                    record: record.name.clone(),
                    field: "equipment",
                    name: item_name.clone(),
                }
            })?;
            monster.equip(item)?;
        }
        Ok(monster)
    }

    /// Hero roster, each with its default weapon equipped and potions stocked.
    pub fn heroes(&self) -> &[Combatant] {
        &self.heroes
    }

    pub fn monsters(&self) -> &[Combatant] {
        &self.monsters
    }

    pub fn weapons(&self) -> &[Item] {
        &self.weapons
    }

    pub fn armor(&self) -> &[Item] {
        &self.armor
    }

    pub fn potions(&self) -> &[Potion] {
        &self.potions
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Looks up a weapon or armor piece by name.
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.weapons
            .iter()
            .chain(self.armor.iter())
            .find(|item| item.name == name)
    }

    pub fn find_potion(&self, name: &str) -> Option<&Potion> {
        self.potions.iter().find(|p| p.name == name)
    }

    pub fn find_hero(&self, name: &str) -> Option<usize> {
        self.heroes
            .iter()
            .position(|h| h.name().eq_ignore_ascii_case(name))
    }

    /// A fresh battle over the whole roster and monster pool.
    pub fn new_battle(&self, config: BattleConfig) -> Battle {
        Battle::new(config, self.heroes.clone(), self.monsters.clone())
            .with_projectiles(self.projectiles.clone())
    }
}
