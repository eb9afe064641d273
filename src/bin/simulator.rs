//! Arena Headless Battle Simulator
//!
//! Plays whole runs without any UI, driving the battle engine at a fixed
//! tick rate with a simple autopilot for the hero. Useful for checking
//! data balance.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Run with `--help` for the option list. Set `RUST_LOG` to override the
//! log filter.

use arena::battle::{Battle, BattleEvent, BattleOutcome, PlayerAction};
use arena::core::constants::{HEAL_POTION_HP_THRESHOLD_PERCENT, TICKS_PER_SECOND};
use arena::{BattleConfig, GameData, GameError, GameResult};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "simulator", about = "Headless arena battle simulator")]
struct SimArgs {
    /// Directory holding the JSON data files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Hero to play, by roster name (default: first hero)
    #[arg(long)]
    hero: Option<String>,

    /// RNG seed for the first run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of runs with incrementing seeds
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Battle timing overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip all animation timers
    #[arg(long)]
    instant: bool,

    /// Give up on a run after this many ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,

    /// Print every battle event
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default)]
struct RunSummary {
    outcome: Option<BattleOutcome>,
    ticks: u64,
    enemies_defeated: u32,
    attacks: u32,
    potions_used: u32,
    damage_dealt: u64,
    damage_taken: u64,
    items_equipped: u32,
}

// ── Hero Autopilot ───────────────────────────────────────────────────

fn is_low_hp(hp: u32, max_hp: u32) -> bool {
    u64::from(hp) * 100 < u64::from(max_hp) * u64::from(HEAL_POTION_HP_THRESHOLD_PERCENT)
}

/// Special ability first, a heal when low, otherwise attack.
fn choose_action(battle: &Battle) -> PlayerAction {
    let Some(hero) = battle.hero() else {
        return PlayerAction::Attack;
    };
    if hero.hero().is_some_and(|h| !h.used_special_ability) {
        return PlayerAction::SpecialAbility;
    }
    if is_low_hp(hero.hp(), hero.max_hp()) {
        let heal = hero
            .potions()
            .iter()
            .position(|p| p.is_heal() && p.mana_consume <= hero.mana());
        if let Some(index) = heal {
            return PlayerAction::UsePotion(index);
        }
    }
    PlayerAction::Attack
}

// ── Core Simulation Loop ─────────────────────────────────────────────

fn run_simulation(
    data: &GameData,
    config: &BattleConfig,
    hero_index: usize,
    seed: u64,
    args: &SimArgs,
) -> RunSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut battle = data.new_battle(config.clone());
    let mut summary = RunSummary::default();
    let delta_time = 1.0 / TICKS_PER_SECOND as f64;

    battle.select_hero(hero_index, &mut rng);
    let hero_name = battle.hero().map(|h| h.name().to_string()).unwrap_or_default();

    while summary.ticks < args.max_ticks {
        if battle.can_player_act() && !battle.perform(choose_action(&battle)) {
            battle.player_attack();
        }
        for event in battle.update(delta_time, &mut rng) {
            record_event(&mut summary, &event, &hero_name);
            if args.verbose {
                print_event(summary.ticks, &event);
            }
        }
        summary.ticks += 1;
        if battle.is_over() {
            break;
        }
    }

    summary.outcome = battle.outcome();
    summary.enemies_defeated = battle.enemies_defeated();
    summary
}

fn record_event(summary: &mut RunSummary, event: &BattleEvent, hero_name: &str) {
    match event {
        BattleEvent::AttackResolved {
            attacker, outcome, ..
        } => {
            if attacker == hero_name {
                summary.attacks += 1;
                summary.damage_dealt += u64::from(outcome.damage_dealt);
            } else {
                summary.damage_taken += u64::from(outcome.damage_dealt);
            }
        }
        BattleEvent::PoisonTicked { target, damage } if target == hero_name => {
            summary.damage_taken += u64::from(*damage);
        }
        BattleEvent::PotionUsed { .. } => summary.potions_used += 1,
        BattleEvent::ItemDropped { equipped: true, .. } => summary.items_equipped += 1,
        _ => {}
    }
}

// ── Verbose Output ───────────────────────────────────────────────────

fn print_event(tick: u64, event: &BattleEvent) {
    let seconds = tick as f64 / TICKS_PER_SECOND as f64;
    let label = match event {
        BattleEvent::HeroSelected { name } => format!("{name} enters the arena"),
        BattleEvent::EnemySpawned { name, class } => format!("{name} the {class} appears"),
        BattleEvent::AttackStarted { attacker, ranged } => {
            let style = if *ranged { "shoots" } else { "charges" };
            format!("{attacker} {style}")
        }
        BattleEvent::ProjectileLaunched {
            projectile_type,
            flight_secs,
        } => format!("{projectile_type} in flight for {flight_secs:.2}s"),
        BattleEvent::AttackResolved {
            attacker,
            target,
            outcome,
        } => {
            let mut line = format!("{attacker} hits {target} for {}", outcome.damage_dealt);
            if outcome.critical {
                line.push_str(" (CRIT)");
            }
            if let Some(poison) = &outcome.poison_applied {
                line.push_str(&format!(", poisoned with {poison}"));
            }
            if !outcome.buffs_stolen.is_empty() {
                line.push_str(&format!(", stole {}", outcome.buffs_stolen.join(", ")));
            }
            if outcome.target_revived {
                line.push_str(&format!(", {target} rises again"));
            }
            if !outcome.performed {
                line = format!("{attacker} is out of mana");
            }
            line
        }
        BattleEvent::PotionUsed { potion, outcome } => format!("drank {potion}: {outcome:?}"),
        BattleEvent::PotionsDepleted { names } => format!("used up {}", names.join(", ")),
        BattleEvent::SpecialAbilityUsed { buff } => format!("special ability: {buff}"),
        BattleEvent::PoisonTicked { target, damage } => format!("{target} takes {damage} poison"),
        BattleEvent::BuffsExpired { target, names } => {
            format!("{target} loses {}", names.join(", "))
        }
        BattleEvent::TurnChanged(turn) => format!("turn: {turn:?}"),
        BattleEvent::RoundEnded { round } => format!("round {round} over"),
        BattleEvent::EnemyDefeated { name } => format!("{name} defeated"),
        BattleEvent::ItemDropped { item, equipped } => {
            let note = if *equipped { "equipped" } else { "left behind" };
            format!("{item} dropped ({note})")
        }
        BattleEvent::GameOver(outcome) => format!("game over: {outcome}"),
    };
    println!("[{seconds:>8.2}s] {label}");
}

fn print_summary(run: u32, seed: u64, summary: &RunSummary) {
    let outcome = summary
        .outcome
        .map(|o| o.to_string())
        .unwrap_or_else(|| "timeout".to_string());
    println!(
        "run {run} seed {seed}: {outcome} after {:.1}s | enemies {} | attacks {} | dealt {} | taken {} | potions {} | loot {}",
        summary.ticks as f64 / TICKS_PER_SECOND as f64,
        summary.enemies_defeated,
        summary.attacks,
        summary.damage_dealt,
        summary.damage_taken,
        summary.potions_used,
        summary.items_equipped,
    );
}

// ── Entry Point ──────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default = if verbose { "arena=debug" } else { "arena=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &SimArgs) -> GameResult<()> {
    let data = GameData::load_dir(&args.data_dir)?;
    let mut config = match &args.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if args.instant {
        config = BattleConfig {
            max_rounds_per_encounter: config.max_rounds_per_encounter,
            ..BattleConfig::instant()
        };
    }

    let hero_index = match &args.hero {
        Some(name) => data.find_hero(name).ok_or_else(|| GameError::UnknownReference {
            record: "simulator".to_string(),
            field: "hero",
            name: name.clone(),
        })?,
        None => 0,
    };

    let mut victories = 0;
    for run in 0..args.runs {
        let seed = args.seed + u64::from(run);
        let summary = run_simulation(&data, &config, hero_index, seed, args);
        if summary.outcome == Some(BattleOutcome::Victory) {
            victories += 1;
        }
        print_summary(run + 1, seed, &summary);
    }
    if args.runs > 1 {
        println!("victories: {victories}/{}", args.runs);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = SimArgs::parse();
    init_logging(args.verbose);
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("simulator: {err}");
            ExitCode::FAILURE
        }
    }
}
