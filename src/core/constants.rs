// Tick and timing
pub const TICKS_PER_SECOND: u32 = 60;
pub const ATTACK_DURATION_SECONDS: f64 = 1.0;
pub const RETURN_DURATION_SECONDS: f64 = 1.0;
pub const ENEMY_THINK_DELAY_SECONDS: f64 = 1.5;
pub const ENEMY_RESPAWN_SECONDS: f64 = 2.0;

// Stage geometry (presentation units, only used to derive timer lengths)
pub const APPROACH_DISTANCE: f64 = 300.0;
pub const APPROACH_SPEED_SCALE: f64 = 10.0;
pub const PROJECTILE_DISTANCE: f64 = 400.0;
pub const DEFAULT_SPEED: u32 = 10;

// Class attack weights, in tenths: (strength, dexterity, intelligence)
pub const WARRIOR_ATTACK_WEIGHTS: (u32, u32, u32) = (5, 3, 2);
pub const CLERIC_ATTACK_WEIGHTS: (u32, u32, u32) = (3, 2, 5);
pub const THIEF_ATTACK_WEIGHTS: (u32, u32, u32) = (3, 5, 2);
pub const WIZARD_ATTACK_WEIGHTS: (u32, u32, u32) = (2, 2, 6);
pub const ATTACK_WEIGHT_SCALE: u32 = 10;

// Chance rolls (percent)
pub const MONSTER_BONUS_DAMAGE_CHANCE: u32 = 50;
pub const THIEF_CRIT_CHANCE: u32 = 25;
pub const GOBLIN_CRIT_CHANCE: u32 = 20;
pub const SPIDER_POISON_CHANCE: u32 = 40;

// Mitigation
pub const DEFENSE_MITIGATION_DIVISOR: u32 = 2;

// Simulator policy
pub const HEAL_POTION_HP_THRESHOLD_PERCENT: u32 = 40;
