//! Turn engine: sequences hero and enemy actions, respawns enemies and
//! decides when the run is over.

use rand::Rng;
use tracing::{debug, info, trace};

use super::types::{BattleEvent, BattleOutcome, BattlePhase, PlayerAction, Turn};
use crate::combat::motion::{AttackMotion, Projectile};
use crate::combat::types::{AttackOutcome, Combatant};
use crate::core::config::BattleConfig;
use crate::items::types::Item;

/// One run: a hero picked from the roster fights monsters drawn from the
/// pool until either side runs out.
///
/// Intent methods (`player_attack`, `player_use_potion`, ...) return `false`
/// and change nothing when the action is not legal right now. Everything
/// time-based happens in [`Battle::update`], which returns the events
/// produced since the previous call.
#[derive(Debug, Clone)]
pub struct Battle {
    config: BattleConfig,
    roster: Vec<Combatant>,
    monster_pool: Vec<Combatant>,
    projectiles: Vec<Projectile>,
    hero: Option<Combatant>,
    enemy: Option<Combatant>,
    phase: BattlePhase,
    turn: Turn,
    /// The side whose turn it is has started its action
    acted: bool,
    /// Side whose attack is waiting for its resolution instant
    pending_attack: Option<Turn>,
    motion: AttackMotion,
    think_timer: f64,
    respawn_timer: f64,
    /// Completed rounds in the current encounter
    round: u32,
    enemies_defeated: u32,
    events: Vec<BattleEvent>,
}

impl Battle {
    pub fn new(config: BattleConfig, roster: Vec<Combatant>, monster_pool: Vec<Combatant>) -> Self {
        Self {
            config,
            roster,
            monster_pool,
            projectiles: Vec::new(),
            hero: None,
            enemy: None,
            phase: BattlePhase::CharacterSelect,
            turn: Turn::Player,
            acted: false,
            pending_attack: None,
            motion: AttackMotion::new(),
            think_timer: 0.0,
            respawn_timer: 0.0,
            round: 0,
            enemies_defeated: 0,
            events: Vec::new(),
        }
    }

    pub fn with_projectiles(mut self, projectiles: Vec<Projectile>) -> Self {
        self.projectiles = projectiles;
        self
    }

    // ---- Read accessors ----

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    pub fn hero(&self) -> Option<&Combatant> {
        self.hero.as_ref()
    }

    pub fn enemy(&self) -> Option<&Combatant> {
        self.enemy.as_ref()
    }

    pub fn remaining_monsters(&self) -> usize {
        self.monster_pool.len()
    }

    pub fn motion(&self) -> &AttackMotion {
        &self.motion
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn enemies_defeated(&self) -> u32 {
        self.enemies_defeated
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// True when a player intent would be accepted.
    pub fn can_player_act(&self) -> bool {
        self.phase == BattlePhase::Active
            && self.turn == Turn::Player
            && !self.acted
            && self.pending_attack.is_none()
            && self.motion.is_complete()
            && self.hero.as_ref().is_some_and(Combatant::is_alive)
            && self.enemy.as_ref().is_some_and(Combatant::is_alive)
    }

    // ---- Setup ----

    /// Picks a hero from the roster and brings in the first enemy.
    pub fn select_hero(&mut self, index: usize, rng: &mut impl Rng) -> bool {
        if self.phase != BattlePhase::CharacterSelect {
            debug!(phase = ?self.phase, "hero selection ignored outside character select");
            return false;
        }
        let Some(hero) = self.roster.get(index).cloned() else {
            debug!(index, "no hero at roster index");
            return false;
        };
        info!(hero = %hero.name(), class = hero.class_name(), "hero selected");
        self.events.push(BattleEvent::HeroSelected {
            name: hero.name().to_string(),
        });
        self.hero = Some(hero);
        self.spawn_next_enemy(rng);
        true
    }

    // ---- Player intents ----

    pub fn perform(&mut self, action: PlayerAction) -> bool {
        match action {
            PlayerAction::Attack => self.player_attack(),
            PlayerAction::UsePotion(index) => self.player_use_potion(index),
            PlayerAction::SpecialAbility => self.player_use_special_ability(),
        }
    }

    pub fn player_attack(&mut self) -> bool {
        if !self.can_player_act() {
            debug!("attack ignored: player cannot act");
            return false;
        }
        self.start_attack(Turn::Player);
        true
    }

    /// Drinks a potion. Completes immediately; depleted potions are removed
    /// afterwards. Unaffordable potions are ignored without spending the turn.
    pub fn player_use_potion(&mut self, index: usize) -> bool {
        if !self.can_player_act() {
            debug!("potion ignored: player cannot act");
            return false;
        }
        let Some(hero) = self.hero.as_mut() else {
            return false;
        };
        let Some(name) = hero.potions().get(index).map(|p| p.name.clone()) else {
            debug!(index, "potion ignored: no potion at index");
            return false;
        };
        match hero.drink_potion(index) {
            Ok(Some(outcome)) => {
                debug!(potion = %name, ?outcome, "potion used");
                self.events.push(BattleEvent::PotionUsed {
                    potion: name,
                    outcome,
                });
                let depleted = hero.remove_depleted_potions();
                if !depleted.is_empty() {
                    self.events
                        .push(BattleEvent::PotionsDepleted { names: depleted });
                }
                self.acted = true;
                true
            }
            Ok(None) => {
                debug!(potion = %name, mana = hero.mana(), "potion ignored: not enough mana");
                false
            }
            Err(err) => {
                debug!(potion = %name, error = %err, "potion ignored");
                false
            }
        }
    }

    /// Uses the hero's special ability, once per encounter.
    pub fn player_use_special_ability(&mut self) -> bool {
        if !self.can_player_act() {
            debug!("special ability ignored: player cannot act");
            return false;
        }
        let Some(hero) = self.hero.as_mut() else {
            return false;
        };
        if hero.hero().is_some_and(|h| h.used_special_ability) {
            debug!("special ability ignored: already used this encounter");
            return false;
        }
        let Some(buff) = hero.use_special_ability() else {
            return false;
        };
        if let Some(profile) = hero.hero_mut() {
            profile.used_special_ability = true;
        }
        debug!(buff = %buff, "special ability used");
        self.events
            .push(BattleEvent::SpecialAbilityUsed { buff: buff.name });
        self.acted = true;
        true
    }

    // ---- Time ----

    /// Advances every timer by `delta_time` seconds and returns the events
    /// produced since the last call.
    pub fn update(&mut self, delta_time: f64, rng: &mut impl Rng) -> Vec<BattleEvent> {
        match self.phase {
            BattlePhase::Active => self.update_active(delta_time, rng),
            BattlePhase::EnemyDefeatedPendingRespawn => {
                self.motion.update(delta_time);
                self.respawn_timer += delta_time;
                trace!(timer = self.respawn_timer, "respawn timer");
                if self.respawn_timer >= self.config.respawn_delay_secs
                    && self.spawn_next_enemy(rng)
                {
                    // A kill ends the round after the player's half only. Its
                    // effects still tick once, as the next enemy enters.
                    self.process_round_effects(rng);
                }
            }
            BattlePhase::CharacterSelect | BattlePhase::GameOver(_) => {}
        }
        std::mem::take(&mut self.events)
    }

    fn update_active(&mut self, delta_time: f64, rng: &mut impl Rng) {
        if self.motion.update(delta_time) {
            self.resolve_pending_attack(rng);
        }
        if self.phase != BattlePhase::Active {
            return;
        }
        if self.turn == Turn::Enemy && !self.acted {
            self.think_timer += delta_time;
            trace!(timer = self.think_timer, "enemy thinking");
            if self.think_timer >= self.config.enemy_think_delay_secs {
                self.start_attack(Turn::Enemy);
            }
        }
        self.advance_turn(rng);
    }

    fn start_attack(&mut self, side: Turn) {
        let attacker = match side {
            Turn::Player => self.hero.as_ref(),
            Turn::Enemy => self.enemy.as_ref(),
        };
        let Some(attacker) = attacker else {
            return;
        };
        let weapon = attacker.equipment().weapon();
        let ranged = weapon.is_some_and(Item::is_ranged);
        let name = attacker.name().to_string();
        if ranged {
            let projectile = weapon.and_then(|w| {
                self.projectiles
                    .iter()
                    .find(|p| p.weapon == w.name)
                    .cloned()
            });
            if let Some(projectile) = &projectile {
                self.events.push(BattleEvent::ProjectileLaunched {
                    projectile_type: projectile.projectile_type.clone(),
                    flight_secs: self.config.projectile_flight_secs(projectile.speed),
                });
            }
            self.motion.start_ranged(&self.config, projectile);
        } else {
            self.motion.start_melee(&self.config, attacker.speed());
        }
        debug!(attacker = %name, ranged, "attack started");
        self.events.push(BattleEvent::AttackStarted {
            attacker: name,
            ranged,
        });
        self.pending_attack = Some(side);
        self.acted = true;
    }

    /// Applies the in-flight attack's damage. Safe to call more than once:
    /// only the first call after an attack starts does anything.
    pub fn resolve_pending_attack(&mut self, rng: &mut impl Rng) -> Option<AttackOutcome> {
        let side = self.pending_attack.take()?;
        let (Some(hero), Some(enemy)) = (self.hero.as_mut(), self.enemy.as_mut()) else {
            return None;
        };
        let (attacker, target) = match side {
            Turn::Player => (hero, enemy),
            Turn::Enemy => (enemy, hero),
        };
        let outcome = attacker.attack(target, rng);
        self.events.push(BattleEvent::AttackResolved {
            attacker: attacker.name().to_string(),
            target: target.name().to_string(),
            outcome: outcome.clone(),
        });
        self.check_battle_outcome(rng);
        Some(outcome)
    }

    /// Hands the turn to the other side once the current action has fully
    /// finished (resolved, attacker idle, projectile landed). Returns false
    /// when the turn cannot change yet.
    pub fn advance_turn(&mut self, rng: &mut impl Rng) -> bool {
        if self.phase != BattlePhase::Active
            || !self.acted
            || self.pending_attack.is_some()
            || !self.motion.is_complete()
        {
            return false;
        }
        self.acted = false;
        self.think_timer = 0.0;
        self.turn = self.turn.other();
        trace!(turn = ?self.turn, "turn changed");
        self.events.push(BattleEvent::TurnChanged(self.turn));
        if self.turn == Turn::Player {
            self.end_round(rng);
        }
        true
    }

    fn end_round(&mut self, rng: &mut impl Rng) {
        self.round += 1;
        debug!(round = self.round, "round ended");
        self.events.push(BattleEvent::RoundEnded { round: self.round });
        self.process_round_effects(rng);
        if self.phase != BattlePhase::Active {
            return;
        }
        if let Some(cap) = self.config.max_rounds_per_encounter {
            if self.round >= cap {
                info!(rounds = self.round, "round cap reached");
                self.finish(BattleOutcome::Stalemate);
            }
        }
    }

    fn process_round_effects(&mut self, rng: &mut impl Rng) {
        for combatant in [self.hero.as_mut(), self.enemy.as_mut()]
            .into_iter()
            .flatten()
        {
            let effects = combatant.end_round();
            let target = combatant.name().to_string();
            if effects.poison_damage > 0 {
                self.events.push(BattleEvent::PoisonTicked {
                    target: target.clone(),
                    damage: effects.poison_damage,
                });
            }
            if !effects.expired_buffs.is_empty() {
                self.events.push(BattleEvent::BuffsExpired {
                    target,
                    names: effects.expired_buffs.into_iter().map(|b| b.name).collect(),
                });
            }
        }
        self.check_battle_outcome(rng);
    }

    // ---- Outcome ----

    /// Reacts to a dead hero or enemy. Returns the final outcome once the
    /// game is over.
    pub fn check_battle_outcome(&mut self, rng: &mut impl Rng) -> Option<BattleOutcome> {
        if self.phase != BattlePhase::Active {
            return self.outcome();
        }
        if self.hero.as_ref().is_some_and(|h| !h.is_alive()) {
            self.finish(BattleOutcome::Defeat);
        } else if self.enemy.as_ref().is_some_and(|e| !e.is_alive()) {
            self.on_enemy_defeated(rng);
        }
        self.outcome()
    }

    fn on_enemy_defeated(&mut self, rng: &mut impl Rng) {
        let Some(mut enemy) = self.enemy.take() else {
            return;
        };
        self.enemies_defeated += 1;
        info!(
            enemy = %enemy.name(),
            rounds = self.round,
            remaining = self.monster_pool.len(),
            "enemy defeated"
        );
        self.events.push(BattleEvent::EnemyDefeated {
            name: enemy.name().to_string(),
        });
        if let (Some(item), Some(hero)) = (enemy.drop_item(rng), self.hero.as_mut()) {
            let name = item.name.clone();
            let equipped = hero.equipment().is_free(item.slot) && hero.equip(item).is_ok();
            debug!(item = %name, equipped, "loot dropped");
            self.events.push(BattleEvent::ItemDropped {
                item: name,
                equipped,
            });
        }
        self.pending_attack = None;
        self.acted = false;
        if self.monster_pool.is_empty() {
            self.finish(BattleOutcome::Victory);
        } else {
            self.phase = BattlePhase::EnemyDefeatedPendingRespawn;
            self.respawn_timer = 0.0;
        }
    }

    /// Draws the next enemy uniformly from the pool. An empty pool ends the
    /// run in victory.
    fn spawn_next_enemy(&mut self, rng: &mut impl Rng) -> bool {
        if self.monster_pool.is_empty() {
            self.finish(BattleOutcome::Victory);
            return false;
        }
        let index = rng.gen_range(0..self.monster_pool.len());
        let enemy = self.monster_pool.swap_remove(index);
        info!(
            enemy = %enemy.name(),
            class = enemy.class_name(),
            hp = enemy.max_hp(),
            "enemy entered"
        );
        self.events.push(BattleEvent::EnemySpawned {
            name: enemy.name().to_string(),
            class: enemy.class_name(),
        });
        self.enemy = Some(enemy);
        if let Some(hero) = self.hero.as_mut().and_then(Combatant::hero_mut) {
            hero.used_special_ability = false;
        }
        self.phase = BattlePhase::Active;
        self.turn = Turn::Player;
        self.acted = false;
        self.pending_attack = None;
        self.think_timer = 0.0;
        self.round = 0;
        self.events.push(BattleEvent::TurnChanged(Turn::Player));
        true
    }

    fn finish(&mut self, outcome: BattleOutcome) {
        info!(
            %outcome,
            enemies_defeated = self.enemies_defeated,
            "game over"
        );
        self.phase = BattlePhase::GameOver(outcome);
        self.pending_attack = None;
        self.events.push(BattleEvent::GameOver(outcome));
    }
}
