//! The combatant contract: equipment, damage, healing, status effects and
//! the per-class attack formulas.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use super::types::{AttackOutcome, Combatant, CombatantKind, HeroClass, MonsterClass};
use crate::core::constants::*;
use crate::core::error::{GameError, GameResult};
use crate::effects::{ActiveBuff, ActivePoison, Buff, Poison};
use crate::items::potions::PotionOutcome;
use crate::items::types::{EquipmentSlot, Item};

/// Status-effect bookkeeping performed for one combatant at the end of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundEffects {
    pub poison_damage: u32,
    pub expired_buffs: Vec<Buff>,
    pub expired_poisons: Vec<Poison>,
}

impl Combatant {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Zombies that have not yet used their revival.
    pub fn can_revive(&self) -> bool {
        matches!(
            self.monster().map(|m| &m.class),
            Some(MonsterClass::Zombie { can_revive: true })
        )
    }

    // ---- Equipment ----

    pub fn equip(&mut self, item: Item) -> GameResult<()> {
        if let Some(occupant) = self.equipment.get(item.slot) {
            return Err(GameError::InvalidEquip {
                slot: item.slot,
                occupant: occupant.name.clone(),
            });
        }
        self.base_stats = self.base_stats.add(&item.bonus_stats);
        self.equipment.set(item);
        Ok(())
    }

    /// Removes `item` from its slot and hands it back.
    pub fn unequip(&mut self, item: &Item) -> GameResult<Item> {
        if self.equipment.get(item.slot) != Some(item) {
            return Err(GameError::NotEquipped {
                item: item.name.clone(),
                slot: item.slot,
            });
        }
        self.take_from_slot(item.slot).ok_or_else(|| GameError::NotEquipped {
            item: item.name.clone(),
            slot: item.slot,
        })
    }

    fn take_from_slot(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let item = self.equipment.take(slot)?;
        self.base_stats = self.base_stats.subtract(&item.bonus_stats);
        Some(item)
    }

    /// Monster loot: takes one equipped item chosen uniformly at random.
    pub fn drop_item(&mut self, rng: &mut impl Rng) -> Option<Item> {
        let occupied: Vec<EquipmentSlot> =
            self.equipment.iter_equipped().map(|i| i.slot).collect();
        let slot = *occupied.choose(rng)?;
        self.take_from_slot(slot)
    }

    // ---- Damage and healing ----

    /// Flat reduction: defense, then armor, then a Warrior's shield.
    pub fn mitigation(&self) -> u32 {
        let shield = match &self.kind {
            CombatantKind::Hero(hero) => match hero.class {
                HeroClass::Warrior { shield } => shield,
                _ => 0,
            },
            CombatantKind::Monster(_) => 0,
        };
        (self.base_stats.defense / DEFENSE_MITIGATION_DIVISOR)
            .saturating_add(self.equipment.armor_mitigation())
            .saturating_add(shield)
    }

    /// Applies mitigated damage and returns the HP actually lost.
    pub fn receive_damage(&mut self, amount: u32) -> u32 {
        let net = amount.saturating_sub(self.mitigation());
        self.lose_hp(net)
    }

    /// Unmitigated HP loss, floored at 0. A Zombie hitting 0 for the first
    /// time comes straight back at full HP.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_sub(amount);
        let lost = before - self.hp;
        if self.hp == 0 {
            self.revive();
        }
        lost
    }

    fn revive(&mut self) -> bool {
        let revived = match self.monster_mut().map(|m| &mut m.class) {
            Some(MonsterClass::Zombie { can_revive }) if *can_revive => {
                *can_revive = false;
                true
            }
            _ => false,
        };
        if revived {
            self.hp = self.max_hp;
            debug!(name = %self.name, hp = self.hp, "zombie revived");
        }
        revived
    }

    /// Restores up to `amount` HP, capped at max HP. Returns the HP gained.
    pub fn heal(&mut self, amount: u32) -> GameResult<u32> {
        if amount == 0 {
            return Err(GameError::InvalidAmount {
                operation: "heal",
                amount,
            });
        }
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        Ok(self.hp - before)
    }

    // ---- Buffs ----

    /// Folds a buff into the stat block and records it as active. Wizards
    /// amplify every buff they gain. Returns the buff as applied.
    pub fn add_buff(&mut self, buff: Buff) -> Buff {
        let buff = match self.hero().map(|h| &h.class) {
            Some(HeroClass::Wizard {
                buff_amount_boost,
                buff_duration_boost,
            }) => buff.amplified(*buff_amount_boost, *buff_duration_boost),
            _ => buff,
        };
        let applied = self.base_stats.apply_delta(buff.stat, buff.amount);
        self.buffs.push(ActiveBuff {
            remaining: buff.duration,
            buff: buff.clone(),
            applied,
        });
        buff
    }

    pub fn apply_buffs(&mut self, buffs: impl IntoIterator<Item = Buff>) {
        for buff in buffs {
            self.add_buff(buff);
        }
    }

    pub fn tick_buffs(&mut self) {
        for active in &mut self.buffs {
            active.tick();
        }
    }

    /// Drops expired buffs, subtracting exactly what each one added.
    pub fn remove_buffs(&mut self) -> Vec<Buff> {
        let (expired, kept): (Vec<ActiveBuff>, Vec<ActiveBuff>) =
            std::mem::take(&mut self.buffs)
                .into_iter()
                .partition(ActiveBuff::is_expired);
        self.buffs = kept;
        expired
            .into_iter()
            .map(|active| {
                self.base_stats.revert_delta(active.applied);
                active.buff
            })
            .collect()
    }

    fn take_buff_at(&mut self, index: usize) -> Buff {
        let active = self.buffs.remove(index);
        self.base_stats.revert_delta(active.applied);
        active.buff
    }

    // ---- Poisons ----

    pub fn add_poison(&mut self, poison: Poison) {
        self.poisons.push(ActivePoison::new(poison));
    }

    /// Deals each active poison's damage, bypassing mitigation.
    pub fn apply_poisons(&mut self) -> u32 {
        let total = self
            .poisons
            .iter()
            .fold(0u32, |acc, p| acc.saturating_add(p.poison.damage_per_turn));
        if total == 0 {
            return 0;
        }
        self.lose_hp(total)
    }

    pub fn tick_poisons(&mut self) {
        for active in &mut self.poisons {
            active.tick();
        }
    }

    pub fn remove_poisons(&mut self) -> Vec<Poison> {
        let (expired, kept): (Vec<ActivePoison>, Vec<ActivePoison>) =
            std::mem::take(&mut self.poisons)
                .into_iter()
                .partition(ActivePoison::is_expired);
        self.poisons = kept;
        expired.into_iter().map(|active| active.poison).collect()
    }

    /// Weakens every active poison; neutralised ones are dropped.
    pub fn mitigate_poisons(&mut self, amount: u32) {
        if amount == 0 {
            return;
        }
        self.poisons.retain_mut(|active| !active.mitigate(amount));
    }

    /// Poison damage, then buff and poison countdowns.
    pub fn end_round(&mut self) -> RoundEffects {
        let poison_damage = self.apply_poisons();
        self.tick_buffs();
        let expired_buffs = self.remove_buffs();
        self.tick_poisons();
        let expired_poisons = self.remove_poisons();
        trace!(
            name = %self.name,
            poison_damage,
            buffs = self.buffs.len(),
            poisons = self.poisons.len(),
            "round effects processed"
        );
        RoundEffects {
            poison_damage,
            expired_buffs,
            expired_poisons,
        }
    }

    // ---- Hero actions ----

    /// Applies the hero's special ability to itself. Once-per-encounter
    /// gating lives in the battle engine.
    pub fn use_special_ability(&mut self) -> Option<Buff> {
        let ability = self.hero()?.special_ability.clone();
        Some(self.add_buff(ability))
    }

    /// Drinks the potion at `index`, paying its mana cost.
    ///
    /// Returns `Ok(None)` without side effects when the hero cannot afford it
    /// or the index is out of range.
    pub fn drink_potion(&mut self, index: usize) -> GameResult<Option<PotionOutcome>> {
        let Some(hero) = self.hero_mut() else {
            return Err(GameError::TypeMismatch {
                expected: "hero",
                found: "monster",
            });
        };
        let Some(cost) = hero.potions.get(index).map(|p| p.mana_consume) else {
            return Ok(None);
        };
        if hero.mana < cost {
            return Ok(None);
        }
        let mut potion = hero.potions.remove(index);
        let result = potion.use_on(self);
        if let Some(hero) = self.hero_mut() {
            if result.is_ok() {
                hero.mana -= cost;
            }
            hero.potions.insert(index, potion);
        }
        result.map(Some)
    }

    /// Removes used-up potions, returning their names.
    pub fn remove_depleted_potions(&mut self) -> Vec<String> {
        let Some(hero) = self.hero_mut() else {
            return Vec::new();
        };
        let (depleted, kept) = std::mem::take(&mut hero.potions)
            .into_iter()
            .partition(|p| p.is_depleted());
        hero.potions = kept;
        depleted.into_iter().map(|p| p.name).collect()
    }

    // ---- Attacks ----

    /// Attacks `target` with the class-specific formula.
    ///
    /// A hero without enough mana soft-fails: nothing changes and the
    /// outcome reports `performed == false`.
    pub fn attack(&mut self, target: &mut Combatant, rng: &mut impl Rng) -> AttackOutcome {
        if !self.is_alive() || !target.is_alive() {
            return AttackOutcome::default();
        }
        let revivable = target.can_revive();
        let mut outcome = match &self.kind {
            CombatantKind::Hero(_) => self.hero_attack(target, rng),
            CombatantKind::Monster(_) => self.monster_attack(target, rng),
        };
        outcome.target_revived = revivable && !target.can_revive();
        if outcome.performed {
            debug!(
                attacker = %self.name,
                target = %target.name,
                damage = outcome.damage,
                dealt = outcome.damage_dealt,
                critical = outcome.critical,
                "attack resolved"
            );
        }
        outcome
    }

    fn hero_attack(&mut self, target: &mut Combatant, rng: &mut impl Rng) -> AttackOutcome {
        let stats = self.base_stats;
        let weapon_roll = self
            .equipment
            .weapon()
            .and_then(Item::weapon_profile)
            .map_or(0, |w| rng.gen_range(w.damage_min..=w.damage_max));
        let Some(hero) = self.hero_mut() else {
            return AttackOutcome::default();
        };
        if hero.mana < hero.mana_per_attack {
            debug!(mana = hero.mana, cost = hero.mana_per_attack, "not enough mana to attack");
            return AttackOutcome::default();
        }
        hero.mana -= hero.mana_per_attack;

        let (ws, wd, wi) = match hero.class {
            HeroClass::Warrior { .. } => WARRIOR_ATTACK_WEIGHTS,
            HeroClass::Cleric { .. } => CLERIC_ATTACK_WEIGHTS,
            HeroClass::Thief { .. } => THIEF_ATTACK_WEIGHTS,
            HeroClass::Wizard { .. } => WIZARD_ATTACK_WEIGHTS,
        };
        let weighted = stats
            .strength
            .saturating_mul(ws)
            .saturating_add(stats.dexterity.saturating_mul(wd))
            .saturating_add(stats.intelligence.saturating_mul(wi));
        let mut outcome = AttackOutcome {
            damage: (weighted / ATTACK_WEIGHT_SCALE).saturating_add(weapon_roll),
            performed: true,
            ..Default::default()
        };

        let class = hero.class.clone();
        if let HeroClass::Thief { critical_bonus } = class {
            if rng.gen_range(0..100) < THIEF_CRIT_CHANCE {
                outcome.damage = outcome.damage.saturating_add(critical_bonus);
                outcome.critical = true;
            }
        }

        outcome.damage_dealt = target.receive_damage(outcome.damage);

        if let HeroClass::Cleric {
            healing_per_attack,
            poisons_mitigation,
        } = class
        {
            if healing_per_attack > 0 {
                outcome.healed = self.heal(healing_per_attack).unwrap_or(0);
            }
            self.mitigate_poisons(poisons_mitigation);
        }
        outcome
    }

    fn monster_attack(&mut self, target: &mut Combatant, rng: &mut impl Rng) -> AttackOutcome {
        let Some(monster) = self.monster() else {
            return AttackOutcome::default();
        };
        let bonus = monster.bonus_damage;
        let mut outcome = AttackOutcome {
            damage: monster.base_damage,
            performed: true,
            ..Default::default()
        };
        if rng.gen_range(0..100) < MONSTER_BONUS_DAMAGE_CHANCE {
            outcome.damage = outcome.damage.saturating_add(bonus);
        }

        match monster.class.clone() {
            MonsterClass::Goblin { .. } => {
                if rng.gen_range(0..100) < GOBLIN_CRIT_CHANCE {
                    outcome.damage = outcome.damage.saturating_add(bonus);
                    outcome.critical = true;
                }
                outcome.buffs_stolen = self
                    .steal(target, rng)
                    .into_iter()
                    .map(|b| b.name)
                    .collect();
            }
            MonsterClass::Witch { poisons } if !poisons.is_empty() => {
                // Casting replaces the direct hit while the supply lasts
                outcome.damage = 0;
                outcome.poison_applied = self.cast_poison(target, rng).map(|p| p.name);
                return outcome;
            }
            MonsterClass::Spider { can_cast: true, .. } => {
                if rng.gen_range(0..100) < SPIDER_POISON_CHANCE {
                    outcome.poison_applied = self.cast_poison(target, rng).map(|p| p.name);
                }
            }
            MonsterClass::Troll { brute_force } => {
                outcome.damage = outcome.damage.saturating_mul(brute_force);
            }
            _ => {}
        }

        outcome.damage_dealt = target.receive_damage(outcome.damage);
        outcome
    }

    /// Goblin ability: strips up to `buff_stole_per_turn` random buffs from
    /// `target`, reverting their stat contributions.
    pub fn steal(&self, target: &mut Combatant, rng: &mut impl Rng) -> Vec<Buff> {
        let Some(MonsterClass::Goblin {
            buff_stole_per_turn,
        }) = self.monster().map(|m| &m.class)
        else {
            return Vec::new();
        };
        let count = (*buff_stole_per_turn as usize).min(target.buffs.len());
        (0..count)
            .map(|_| {
                let index = rng.gen_range(0..target.buffs.len());
                target.take_buff_at(index)
            })
            .collect()
    }

    /// Witch/Spider ability: attaches a poison from the monster's supply to
    /// `target`. Returns the poison cast, if any was left.
    pub fn cast_poison(&mut self, target: &mut Combatant, rng: &mut impl Rng) -> Option<Poison> {
        let monster = self.monster_mut()?;
        let poison = match &mut monster.class {
            MonsterClass::Witch { poisons } if !poisons.is_empty() => {
                let index = rng.gen_range(0..poisons.len());
                poisons.remove(index)
            }
            MonsterClass::Spider { poison, can_cast } if *can_cast => {
                *can_cast = false;
                poison.clone()
            }
            _ => return None,
        };
        debug!(target = %target.name, poison = %poison, "poison cast");
        target.add_poison(poison.clone());
        Some(poison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::stats::{StatBlock, StatType};
    use crate::combat::types::{Hero, Monster};
    use crate::items::potions::Potion;
    use crate::items::types::WeaponType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ability() -> Buff {
        Buff::new("Battle Cry", StatType::Strength, 5, 2).unwrap()
    }

    fn create_hero(class: HeroClass, stats: StatBlock, hp: u32) -> Combatant {
        let hero = Hero::new(class, 50, 5, ability()).unwrap();
        Combatant::new_hero("Hero", hp, stats, hero).unwrap()
    }

    fn create_warrior() -> Combatant {
        create_hero(
            HeroClass::Warrior { shield: 0 },
            StatBlock::new(10, 3, 2, 5),
            100,
        )
    }

    fn create_monster(class: MonsterClass, hp: u32) -> Combatant {
        let monster = Monster::new(1, 4, 2, class).unwrap();
        Combatant::new_monster("Monster", hp, StatBlock::default(), monster).unwrap()
    }

    fn create_sword() -> Item {
        Item::weapon(
            "Sword",
            4,
            StatBlock::new(3, 0, 1, 0),
            (2, 6),
            WeaponType::Melee,
            EquipmentSlot::Weapon,
        )
        .unwrap()
    }

    #[test]
    fn test_equip_adds_bonus_and_unequip_restores() {
        let mut hero = create_warrior();
        let before = *hero.stats();
        let sword = create_sword();
        hero.equip(sword.clone()).unwrap();
        assert_eq!(hero.stats().strength, 13);
        assert_eq!(hero.stats().defense, 3);
        let returned = hero.unequip(&sword).unwrap();
        assert_eq!(returned, sword);
        assert_eq!(*hero.stats(), before);
    }

    #[test]
    fn test_equip_occupied_slot_fails() {
        let mut hero = create_warrior();
        hero.equip(create_sword()).unwrap();
        let err = hero.equip(create_sword()).unwrap_err();
        assert!(matches!(err, GameError::InvalidEquip { slot: EquipmentSlot::Weapon, .. }));
    }

    #[test]
    fn test_unequip_wrong_item_fails() {
        let mut hero = create_warrior();
        hero.equip(create_sword()).unwrap();
        let mut other = create_sword();
        other.name = "Other Sword".to_string();
        let err = hero.unequip(&other).unwrap_err();
        assert!(matches!(err, GameError::NotEquipped { .. }));
        assert!(hero.equipment().weapon().is_some());
    }

    #[test]
    fn test_receive_damage_mitigation_order() {
        let mut warrior = create_hero(
            HeroClass::Warrior { shield: 2 },
            StatBlock::new(0, 0, 4, 0),
            50,
        );
        warrior
            .equip(Item::armor("Mail", 10, StatBlock::default(), EquipmentSlot::Chest, 3).unwrap())
            .unwrap();
        // defense 4 -> 2, armor 3, shield 2
        assert_eq!(warrior.mitigation(), 7);
        assert_eq!(warrior.receive_damage(10), 3);
        assert_eq!(warrior.hp(), 47);
        assert_eq!(warrior.receive_damage(5), 0);
        assert_eq!(warrior.receive_damage(1000), 47);
        assert_eq!(warrior.hp(), 0);
        assert!(!warrior.is_alive());
    }

    #[test]
    fn test_heal_caps_and_rejects_zero() {
        let mut hero = create_warrior();
        hero.lose_hp(30);
        assert_eq!(hero.heal(50).unwrap(), 30);
        assert_eq!(hero.hp(), 100);
        assert!(matches!(hero.heal(0), Err(GameError::InvalidAmount { .. })));
    }

    #[test]
    fn test_warrior_unarmed_attack_formula() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut hero = create_warrior();
        let mut target = create_monster(MonsterClass::Troll { brute_force: 1 }, 50);
        let outcome = hero.attack(&mut target, &mut rng);
        // floor(10*0.5 + 5*0.3 + 3*0.2) = 7
        assert_eq!(outcome.damage, 7);
        assert_eq!(outcome.damage_dealt, 7);
        assert_eq!(target.hp(), 43);
        assert_eq!(hero.mana(), 45);
    }

    #[test]
    fn test_weapon_roll_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut hero = create_warrior();
        hero.equip(create_sword()).unwrap();
        for _ in 0..5 {
            let mut target = create_monster(MonsterClass::Troll { brute_force: 1 }, 200);
            let outcome = hero.attack(&mut target, &mut rng);
            // str 13: floor((65 + 15 + 6) / 10) = 8, plus 2..=6
            assert!((10..=14).contains(&outcome.damage), "damage {}", outcome.damage);
        }
    }

    #[test]
    fn test_attack_without_mana_soft_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let hero = Hero::new(HeroClass::Warrior { shield: 0 }, 4, 5, ability()).unwrap();
        let mut hero = Combatant::new_hero("Tired", 100, StatBlock::new(10, 3, 2, 5), hero).unwrap();
        let mut target = create_monster(MonsterClass::Troll { brute_force: 1 }, 50);
        let outcome = hero.attack(&mut target, &mut rng);
        assert!(!outcome.performed);
        assert_eq!(outcome.damage, 0);
        assert_eq!(hero.mana(), 4);
        assert_eq!(target.hp(), 50);
    }

    #[test]
    fn test_dead_combatants_do_not_attack() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut hero = create_warrior();
        let mut target = create_monster(MonsterClass::Troll { brute_force: 1 }, 50);
        target.lose_hp(50);
        let outcome = hero.attack(&mut target, &mut rng);
        assert!(!outcome.performed);
        assert_eq!(hero.mana(), 50);
    }

    #[test]
    fn test_thief_attack_deals_damage() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut thief = create_hero(
            HeroClass::Thief { critical_bonus: 10 },
            StatBlock::new(4, 2, 0, 10),
            60,
        );
        let mut target = create_monster(MonsterClass::Troll { brute_force: 1 }, 500);
        for _ in 0..8 {
            let outcome = thief.attack(&mut target, &mut rng);
            // floor((12 + 50 + 4) / 10) = 6, +10 on a crit
            let expected = if outcome.critical { 16 } else { 6 };
            assert_eq!(outcome.damage_dealt, expected);
        }
        assert!(target.hp() < 500);
    }

    #[test]
    fn test_cleric_heals_and_mitigates_poison() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut cleric = create_hero(
            HeroClass::Cleric {
                healing_per_attack: 5,
                poisons_mitigation: 2,
            },
            StatBlock::new(2, 10, 0, 2),
            80,
        );
        cleric.lose_hp(20);
        cleric.add_poison(Poison::new("Weak Venom", 2, 3).unwrap());
        cleric.add_poison(Poison::new("Strong Venom", 5, 3).unwrap());
        let mut target = create_monster(MonsterClass::Troll { brute_force: 1 }, 50);
        let outcome = cleric.attack(&mut target, &mut rng);
        assert_eq!(outcome.healed, 5);
        assert_eq!(cleric.hp(), 65);
        assert_eq!(cleric.active_poisons().len(), 1);
        assert_eq!(cleric.active_poisons()[0].poison.damage_per_turn, 3);
    }

    #[test]
    fn test_wizard_amplifies_buffs() {
        let mut wizard = create_hero(
            HeroClass::Wizard {
                buff_amount_boost: 2,
                buff_duration_boost: 1,
            },
            StatBlock::new(1, 10, 1, 1),
            60,
        );
        let applied = wizard.use_special_ability().unwrap();
        assert_eq!(applied.amount, 7);
        assert_eq!(applied.duration, 3);
        assert_eq!(wizard.stats().strength, 8);
    }

    #[test]
    fn test_buff_lifecycle_restores_stat() {
        let mut hero = create_warrior();
        hero.add_buff(Buff::new("Haste", StatType::Dexterity, 4, 2).unwrap());
        assert_eq!(hero.stats().dexterity, 9);
        hero.tick_buffs();
        assert!(hero.remove_buffs().is_empty(), "duration 1 left");
        assert_eq!(hero.stats().dexterity, 9);
        hero.tick_buffs();
        let expired = hero.remove_buffs();
        assert_eq!(expired.len(), 1);
        assert_eq!(hero.stats().dexterity, 5);
        assert!(hero.active_buffs().is_empty());
    }

    #[test]
    fn test_poison_bypasses_mitigation_and_expires() {
        let mut warrior = create_hero(
            HeroClass::Warrior { shield: 50 },
            StatBlock::new(0, 0, 40, 0),
            30,
        );
        warrior.add_poison(Poison::new("Venom", 4, 2).unwrap());
        let first = warrior.end_round();
        assert_eq!(first.poison_damage, 4);
        assert!(first.expired_poisons.is_empty());
        let second = warrior.end_round();
        assert_eq!(second.poison_damage, 4);
        assert_eq!(second.expired_poisons.len(), 1);
        assert_eq!(warrior.hp(), 22);
        assert_eq!(warrior.end_round().poison_damage, 0);
    }

    #[test]
    fn test_zombie_revives_once() {
        let mut zombie = create_monster(MonsterClass::Zombie { can_revive: true }, 30);
        assert!(zombie.can_revive());
        zombie.lose_hp(30);
        assert_eq!(zombie.hp(), 30);
        assert!(zombie.is_alive());
        assert!(!zombie.can_revive());
        zombie.lose_hp(30);
        assert_eq!(zombie.hp(), 0);
        assert!(!zombie.is_alive());
    }

    #[test]
    fn test_attack_reports_zombie_revival() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut hero = create_warrior();
        let mut zombie = create_monster(MonsterClass::Zombie { can_revive: true }, 5);
        let outcome = hero.attack(&mut zombie, &mut rng);
        assert!(outcome.target_revived);
        assert_eq!(zombie.hp(), 5);
    }

    #[test]
    fn test_goblin_steals_one_of_three() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let goblin = create_monster(MonsterClass::Goblin { buff_stole_per_turn: 1 }, 20);
        let mut hero = create_warrior();
        for (name, stat) in [
            ("A", StatType::Strength),
            ("B", StatType::Defense),
            ("C", StatType::Dexterity),
        ] {
            hero.add_buff(Buff::new(name, stat, 2, 3).unwrap());
        }
        let stolen = goblin.steal(&mut hero, &mut rng);
        assert_eq!(stolen.len(), 1);
        assert_eq!(hero.active_buffs().len(), 2);
        // The stolen buff's stat is back to its base value
        let base = StatBlock::new(10, 3, 2, 5);
        assert_eq!(hero.stats().get(stolen[0].stat), base.get(stolen[0].stat));
    }

    #[test]
    fn test_goblin_steals_last_buff() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let goblin = create_monster(MonsterClass::Goblin { buff_stole_per_turn: 1 }, 20);
        let mut hero = create_warrior();
        hero.add_buff(Buff::new("Only", StatType::Strength, 2, 3).unwrap());
        assert_eq!(goblin.steal(&mut hero, &mut rng).len(), 1);
        assert!(hero.active_buffs().is_empty());
        assert_eq!(hero.stats().strength, 10);
    }

    #[test]
    fn test_witch_casts_until_supply_runs_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let poisons = vec![
            Poison::new("Hex", 2, 2).unwrap(),
            Poison::new("Blight", 3, 2).unwrap(),
        ];
        let mut witch = create_monster(MonsterClass::Witch { poisons }, 30);
        let mut hero = create_warrior();
        for _ in 0..2 {
            let outcome = witch.attack(&mut hero, &mut rng);
            assert_eq!(outcome.damage_dealt, 0);
            assert!(outcome.poison_applied.is_some());
        }
        assert_eq!(hero.active_poisons().len(), 2);
        let outcome = witch.attack(&mut hero, &mut rng);
        assert!(outcome.poison_applied.is_none());
        assert!(outcome.damage >= 4);
    }

    #[test]
    fn test_spider_poison_is_one_shot() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let poison = Poison::new("Bite", 2, 2).unwrap();
        let mut spider = create_monster(
            MonsterClass::Spider {
                poison,
                can_cast: true,
            },
            30,
        );
        let mut hero = create_hero(
            HeroClass::Warrior { shield: 0 },
            StatBlock::new(10, 3, 2, 5),
            10_000,
        );
        let casts = (0..40)
            .filter(|_| spider.attack(&mut hero, &mut rng).poison_applied.is_some())
            .count();
        assert_eq!(casts, 1);
        assert_eq!(hero.active_poisons().len(), 1);
    }

    #[test]
    fn test_troll_brute_force_multiplies() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut troll = create_monster(MonsterClass::Troll { brute_force: 3 }, 30);
        let mut hero = create_hero(
            HeroClass::Warrior { shield: 0 },
            StatBlock::default(),
            1000,
        );
        let outcome = troll.attack(&mut hero, &mut rng);
        // base 4, +2 on the bonus roll, times 3
        assert!(outcome.damage == 12 || outcome.damage == 18);
        assert_eq!(hero.hp(), 1000 - outcome.damage);
    }

    #[test]
    fn test_drop_item_takes_equipped() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut troll = create_monster(MonsterClass::Troll { brute_force: 1 }, 30);
        assert!(troll.drop_item(&mut rng).is_none());
        troll.equip(create_sword()).unwrap();
        let dropped = troll.drop_item(&mut rng).unwrap();
        assert_eq!(dropped.name, "Sword");
        assert!(troll.equipment().weapon().is_none());
        assert_eq!(*troll.stats(), StatBlock::default());
    }

    #[test]
    fn test_drink_potion_costs_mana_and_soft_fails() {
        let hero = Hero::new(HeroClass::Warrior { shield: 0 }, 6, 5, ability())
            .unwrap()
            .with_potions(vec![
                Potion::heal("Pricey Heal", 10, 1, 20).unwrap(),
                Potion::heal("Cheap Heal", 4, 1, 20).unwrap(),
            ]);
        let mut hero = Combatant::new_hero("Hero", 100, StatBlock::default(), hero).unwrap();
        hero.lose_hp(30);
        assert_eq!(hero.drink_potion(0).unwrap(), None);
        assert_eq!(hero.mana(), 6);
        assert_eq!(hero.drink_potion(1).unwrap(), Some(PotionOutcome::Healed(20)));
        assert_eq!(hero.mana(), 2);
        assert_eq!(hero.potions().len(), 2, "depleted potion kept until cleanup");
        assert_eq!(hero.remove_depleted_potions(), vec!["Cheap Heal".to_string()]);
        assert_eq!(hero.potions().len(), 1);
        assert_eq!(hero.drink_potion(9).unwrap(), None);
    }
}
