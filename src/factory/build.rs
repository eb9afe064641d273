//! Turns plain records into live entities.
//!
//! Every function here is pure apart from validation: a record with a
//! negative number, an empty name, an unknown stat/slot/type or an
//! unrecognised class tag is rejected with an error naming the record and
//! the offending field.

use super::records::*;
use crate::character::stats::{StatBlock, StatType};
use crate::combat::motion::Projectile;
use crate::combat::types::{Combatant, Hero, HeroClass, Monster, MonsterClass};
use crate::core::error::{GameError, GameResult};
use crate::effects::{Buff, Poison};
use crate::items::potions::Potion;
use crate::items::types::{EquipmentSlot, Item, WeaponType};

/// Converts a signed record field, rejecting negatives.
fn non_negative(record: &str, field: &'static str, value: i64) -> GameResult<u32> {
    if value < 0 {
        return Err(GameError::validation(
            record,
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    u32::try_from(value)
        .map_err(|_| GameError::validation(record, field, format!("{} is too large", value)))
}

fn stat_block(record: &str, stats: &StatRecord) -> GameResult<StatBlock> {
    Ok(StatBlock::new(
        non_negative(record, "strength", stats.strength)?,
        non_negative(record, "intelligence", stats.intelligence)?,
        non_negative(record, "defense", stats.defense)?,
        non_negative(record, "dexterity", stats.dexterity)?,
    ))
}

fn parse_field<T: std::str::FromStr<Err = String>>(
    record: &str,
    field: &'static str,
    value: &str,
) -> GameResult<T> {
    value
        .parse()
        .map_err(|reason: String| GameError::validation(record, field, reason))
}

pub fn create_buff(record: &BuffRecord) -> GameResult<Buff> {
    let stat: StatType = parse_field(&record.name, "stat", &record.stat)?;
    Buff::new(
        record.name.clone(),
        stat,
        non_negative(&record.name, "amount", record.amount)?,
        non_negative(&record.name, "duration", record.duration)?,
    )
}

pub fn create_poison(record: &PoisonRecord) -> GameResult<Poison> {
    Poison::new(
        record.name.clone(),
        non_negative(&record.name, "damage_per_turn", record.damage_per_turn)?,
        non_negative(&record.name, "duration", record.duration)?,
    )
}

/// Builds a hero with no equipment and no potions; the loader attaches
/// the record's defaults.
pub fn create_character(record: &CharacterRecord) -> GameResult<Combatant> {
    let name = record.name.as_str();
    let class = match record.class.to_lowercase().as_str() {
        "warrior" => HeroClass::Warrior {
            shield: non_negative(name, "shield", record.shield)?,
        },
        "cleric" => HeroClass::Cleric {
            healing_per_attack: non_negative(name, "healing_per_attack", record.healing_per_attack)?,
            poisons_mitigation: non_negative(name, "poisons_mitigation", record.poisons_mitigation)?,
        },
        "thief" => HeroClass::Thief {
            critical_bonus: non_negative(name, "critical_bonus", record.critical_bonus)?,
        },
        "wizard" => HeroClass::Wizard {
            buff_amount_boost: non_negative(name, "buff_amount_boost", record.buff_amount_boost)?,
            buff_duration_boost: non_negative(
                name,
                "buff_duration_boost",
                record.buff_duration_boost,
            )?,
        },
        _ => {
            return Err(GameError::UnknownClass {
                kind: "character",
                tag: record.class.clone(),
            })
        }
    };
    let hero = Hero::new(
        class,
        non_negative(name, "mana", record.mana)?,
        non_negative(name, "mana_per_attack", record.mana_per_attack)?,
        create_buff(&record.special_ability)?,
    )
    .map_err(|err| rename_entity(err, name))?;
    Ok(Combatant::new_hero(
        name,
        non_negative(name, "hp", record.hp)?,
        stat_block(name, &record.stats)?,
        hero,
    )?
    .with_speed(non_negative(name, "speed", record.speed)?))
}

pub fn create_weapon(record: &WeaponRecord) -> GameResult<Item> {
    let name = record.name.as_str();
    let weapon_type: WeaponType = parse_field(name, "weapon_type", &record.weapon_type)?;
    let slot: EquipmentSlot = parse_field(name, "slot", &record.slot)?;
    Item::weapon(
        name,
        non_negative(name, "weight", record.weight)?,
        stat_block(name, &record.stats)?,
        (
            non_negative(name, "damage_range_min", record.damage_range_min)?,
            non_negative(name, "damage_range_max", record.damage_range_max)?,
        ),
        weapon_type,
        slot,
    )
}

pub fn create_armor(record: &ArmorRecord) -> GameResult<Item> {
    let name = record.name.as_str();
    let slot: EquipmentSlot = parse_field(name, "slot", &record.slot)?;
    Item::armor(
        name,
        non_negative(name, "weight", record.weight)?,
        stat_block(name, &record.stats)?,
        slot,
        non_negative(name, "mitigation", record.mitigation)?,
    )
}

pub fn create_potion(record: &PotionRecord) -> GameResult<Potion> {
    let name = record.name.as_str();
    let mana_consume = non_negative(name, "mana_consume", record.mana_consume)?;
    let uses = non_negative(name, "uses", record.uses)?;
    match record.kind.to_lowercase().as_str() {
        "heal" => {
            let healing = record.healing_effect.ok_or_else(|| {
                GameError::validation(name, "healing_effect", "required for heal potions")
            })?;
            Potion::heal(
                name,
                mana_consume,
                uses,
                non_negative(name, "healing_effect", healing)?,
            )
        }
        "buff" => {
            let buff = record.buff.as_ref().ok_or_else(|| {
                GameError::validation(name, "buff", "required for buff potions")
            })?;
            Potion::buff(name, mana_consume, uses, create_buff(buff)?)
        }
        _ => Err(GameError::UnknownClass {
            kind: "potion",
            tag: record.kind.clone(),
        }),
    }
}

/// Builds an unequipped monster; hp, damage and poisons are scaled by the
/// record's level.
pub fn create_monster(record: &MonsterRecord) -> GameResult<Combatant> {
    let name = record.name.as_str();
    let class = match record.class.to_lowercase().as_str() {
        "goblin" => MonsterClass::Goblin {
            buff_stole_per_turn: non_negative(name, "buff_stole_per_turn", record.buff_stole_per_turn)?,
        },
        "witch" => MonsterClass::Witch {
            poisons: record
                .poisons
                .iter()
                .map(create_poison)
                .collect::<GameResult<Vec<_>>>()?,
        },
        "zombie" => MonsterClass::Zombie { can_revive: true },
        "spider" => {
            let poison = record.poison.as_ref().ok_or_else(|| {
                GameError::validation(name, "poison", "required for spiders")
            })?;
            MonsterClass::Spider {
                poison: create_poison(poison)?,
                can_cast: true,
            }
        }
        "troll" => MonsterClass::Troll {
            brute_force: non_negative(name, "brute_force", record.brute_force)?,
        },
        _ => {
            return Err(GameError::UnknownClass {
                kind: "monster",
                tag: record.class.clone(),
            })
        }
    };
    let monster = Monster::new(
        non_negative(name, "level", record.level)?,
        non_negative(name, "base_damage", record.base_damage)?,
        non_negative(name, "bonus_damage", record.bonus_damage)?,
        class,
    )
    .map_err(|err| rename_entity(err, name))?;
    Ok(Combatant::new_monster(
        name,
        non_negative(name, "hp", record.hp)?,
        stat_block(name, &record.stats)?,
        monster,
    )?
    .with_speed(non_negative(name, "speed", record.speed)?))
}

pub fn create_projectile(record: &ProjectileRecord) -> GameResult<Projectile> {
    let speed = non_negative(&record.weapon, "speed", record.speed)?;
    if speed == 0 {
        return Err(GameError::validation(
            &record.weapon,
            "speed",
            "must be greater than 0",
        ));
    }
    Ok(Projectile {
        weapon: record.weapon.clone(),
        projectile_type: record.projectile_type.clone(),
        speed,
        effect: record.effect.clone(),
    })
}

/// Validation errors raised by class constructors name the class; report
/// the record instead.
fn rename_entity(err: GameError, record: &str) -> GameError {
    match err {
        GameError::Validation { field, reason, .. } => GameError::Validation {
            entity: record.to_string(),
            field,
            reason,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior_record() -> CharacterRecord {
        CharacterRecord {
            name: "Aldo".to_string(),
            class: "Warrior".to_string(),
            hp: 100,
            mana: 50,
            mana_per_attack: 5,
            stats: StatRecord {
                strength: 10,
                intelligence: 3,
                defense: 2,
                dexterity: 5,
            },
            speed: 12,
            special_ability: BuffRecord {
                name: "Battle Cry".to_string(),
                stat: "strength".to_string(),
                amount: 5,
                duration: 2,
            },
            default_weapon: None,
            default_potions: Vec::new(),
            shield: 2,
            critical_bonus: 0,
            healing_per_attack: 0,
            poisons_mitigation: 0,
            buff_amount_boost: 0,
            buff_duration_boost: 0,
        }
    }

    fn monster_record(class: &str) -> MonsterRecord {
        MonsterRecord {
            name: "Grub".to_string(),
            class: class.to_string(),
            hp: 20,
            base_damage: 3,
            bonus_damage: 2,
            level: 2,
            speed: 10,
            stats: StatRecord::default(),
            equipment: Vec::new(),
            buff_stole_per_turn: 1,
            brute_force: 2,
            poisons: vec![PoisonRecord {
                name: "Hex".to_string(),
                damage_per_turn: 2,
                duration: 3,
            }],
            poison: Some(PoisonRecord {
                name: "Bite".to_string(),
                damage_per_turn: 1,
                duration: 2,
            }),
        }
    }

    fn assert_field(err: GameError, expected: &str) {
        match err {
            GameError::Validation { field, .. } => assert_eq!(field, expected),
            other => panic!("expected validation error on {}, got {:?}", expected, other),
        }
    }

    #[test]
    fn test_create_character() {
        let hero = create_character(&warrior_record()).unwrap();
        assert_eq!(hero.name(), "Aldo");
        assert_eq!(hero.max_hp(), 100);
        assert_eq!(hero.speed(), 12);
        assert_eq!(hero.mana(), 50);
        assert_eq!(*hero.stats(), StatBlock::new(10, 3, 2, 5));
        assert_eq!(hero.hero().unwrap().class, HeroClass::Warrior { shield: 2 });
    }

    #[test]
    fn test_unknown_character_class() {
        let mut record = warrior_record();
        record.class = "Bard".to_string();
        match create_character(&record).unwrap_err() {
            GameError::UnknownClass { kind, tag } => {
                assert_eq!(kind, "character");
                assert_eq!(tag, "Bard");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_negative_stat_names_field() {
        let mut record = warrior_record();
        record.stats.defense = -1;
        assert_field(create_character(&record).unwrap_err(), "defense");
    }

    #[test]
    fn test_zero_mana_per_attack_names_record() {
        let mut record = warrior_record();
        record.mana_per_attack = 0;
        match create_character(&record).unwrap_err() {
            GameError::Validation { entity, field, .. } => {
                assert_eq!(entity, "Aldo");
                assert_eq!(field, "mana_per_attack");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_bad_special_ability_stat() {
        let mut record = warrior_record();
        record.special_ability.stat = "luck".to_string();
        assert_field(create_character(&record).unwrap_err(), "stat");
    }

    #[test]
    fn test_create_weapon_validates_slot_and_type() {
        let mut record = WeaponRecord {
            name: "Bow".to_string(),
            weight: 3,
            stats: StatRecord::default(),
            damage_range_min: 2,
            damage_range_max: 5,
            weapon_type: "ranged".to_string(),
            slot: "weapon".to_string(),
        };
        assert!(create_weapon(&record).unwrap().is_ranged());
        record.slot = "tail".to_string();
        assert_field(create_weapon(&record).unwrap_err(), "slot");
        record.slot = "weapon".to_string();
        record.weapon_type = "thrown".to_string();
        assert_field(create_weapon(&record).unwrap_err(), "weapon_type");
        record.weapon_type = "melee".to_string();
        record.damage_range_min = -2;
        assert_field(create_weapon(&record).unwrap_err(), "damage_range_min");
    }

    #[test]
    fn test_create_armor() {
        let record = ArmorRecord {
            name: "Helm".to_string(),
            weight: 4,
            stats: StatRecord {
                defense: 2,
                ..Default::default()
            },
            slot: "head".to_string(),
            mitigation: 1,
        };
        let helm = create_armor(&record).unwrap();
        assert_eq!(helm.slot, EquipmentSlot::Head);
        assert_eq!(helm.mitigation(), 1);
    }

    #[test]
    fn test_create_potion_kinds() {
        let heal = PotionRecord {
            name: "Heal".to_string(),
            kind: "heal".to_string(),
            mana_consume: 0,
            uses: 2,
            healing_effect: Some(20),
            buff: None,
        };
        assert!(create_potion(&heal).unwrap().is_heal());

        let mut missing = heal.clone();
        missing.healing_effect = None;
        assert_field(create_potion(&missing).unwrap_err(), "healing_effect");

        let mut unknown = heal;
        unknown.kind = "explode".to_string();
        assert!(matches!(
            create_potion(&unknown).unwrap_err(),
            GameError::UnknownClass { kind: "potion", .. }
        ));
    }

    #[test]
    fn test_create_monster_scales_by_level() {
        let troll = create_monster(&monster_record("Troll")).unwrap();
        assert_eq!(troll.max_hp(), 40);
        let monster = troll.monster().unwrap();
        assert_eq!(monster.base_damage, 6);
        assert_eq!(monster.bonus_damage, 4);

        let witch = create_monster(&monster_record("witch")).unwrap();
        match &witch.monster().unwrap().class {
            MonsterClass::Witch { poisons } => assert_eq!(poisons[0].damage_per_turn, 4),
            other => panic!("unexpected class {:?}", other),
        }

        let spider = create_monster(&monster_record("Spider")).unwrap();
        match &spider.monster().unwrap().class {
            MonsterClass::Spider { poison, can_cast } => {
                assert_eq!(poison.damage_per_turn, 2);
                assert_eq!(poison.duration, 4);
                assert!(*can_cast);
            }
            other => panic!("unexpected class {:?}", other),
        }
    }

    #[test]
    fn test_monster_validation() {
        let mut record = monster_record("Goblin");
        record.buff_stole_per_turn = 0;
        assert_field(create_monster(&record).unwrap_err(), "buff_stole_per_turn");

        let mut record = monster_record("Spider");
        record.poison = None;
        assert_field(create_monster(&record).unwrap_err(), "poison");

        let mut record = monster_record("Zombie");
        record.level = 0;
        assert_field(create_monster(&record).unwrap_err(), "level");

        let record = monster_record("Dragon");
        assert!(matches!(
            create_monster(&record).unwrap_err(),
            GameError::UnknownClass { kind: "monster", .. }
        ));
    }

    #[test]
    fn test_create_projectile() {
        let record = ProjectileRecord {
            weapon: "Bow".to_string(),
            projectile_type: "arrow".to_string(),
            speed: 400,
            effect: Some("spark".to_string()),
        };
        assert_eq!(create_projectile(&record).unwrap().speed, 400);
        let stalled = ProjectileRecord { speed: 0, ..record };
        assert_field(create_projectile(&stalled).unwrap_err(), "speed");
    }
}
