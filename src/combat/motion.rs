//! Attack lifecycle timing.
//!
//! An attack walks `Idle -> MovingToRange -> Resolving -> Returning -> Idle`.
//! Ranged attacks skip the walk and the return. The attack window closing is
//! the one instant damage may be applied, and [`AttackMotion::update`]
//! reports it exactly once per attack.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::config::BattleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionPhase {
    #[default]
    Idle,
    MovingToRange,
    Resolving,
    Returning,
}

/// Presentation data for a ranged weapon's projectile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub weapon: String,
    pub projectile_type: String,
    pub speed: u32,
    pub effect: Option<String>,
}

/// A projectile currently in the air.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileFlight {
    pub projectile: Projectile,
    pub elapsed: f64,
    pub duration: f64,
}

impl ProjectileFlight {
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    fn has_landed(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttackMotion {
    phase: MotionPhase,
    timer: f64,
    approach_secs: f64,
    attack_secs: f64,
    return_secs: f64,
    ranged: bool,
    flight: Option<ProjectileFlight>,
}

impl AttackMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a melee attack: walk in at `speed`, swing, walk back.
    pub fn start_melee(&mut self, config: &BattleConfig, speed: u32) {
        *self = Self {
            phase: MotionPhase::MovingToRange,
            approach_secs: config.approach_secs(speed),
            attack_secs: config.attack_duration_secs,
            return_secs: config.return_duration_secs,
            ..Self::default()
        };
        trace!(approach = self.approach_secs, "melee motion started");
    }

    /// Begins a ranged attack. The projectile (if any) is released at once
    /// and flies while the attack window runs.
    pub fn start_ranged(&mut self, config: &BattleConfig, projectile: Option<Projectile>) {
        let flight = projectile.map(|projectile| ProjectileFlight {
            duration: config.projectile_flight_secs(projectile.speed),
            projectile,
            elapsed: 0.0,
        });
        *self = Self {
            phase: MotionPhase::MovingToRange,
            attack_secs: config.attack_duration_secs,
            ranged: true,
            flight,
            ..Self::default()
        };
        trace!("ranged motion started");
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn is_ranged(&self) -> bool {
        self.ranged
    }

    pub fn projectile(&self) -> Option<&ProjectileFlight> {
        self.flight.as_ref()
    }

    /// Idle with nothing left in the air.
    pub fn is_complete(&self) -> bool {
        self.phase == MotionPhase::Idle && self.flight.is_none()
    }

    /// Advances timers by `delta_time`. Returns true on the tick the attack
    /// window closes.
    pub fn update(&mut self, delta_time: f64) -> bool {
        if let Some(flight) = &mut self.flight {
            flight.elapsed += delta_time;
            if flight.has_landed() {
                trace!(projectile = %flight.projectile.projectile_type, "projectile landed");
                self.flight = None;
            }
        }

        let mut remaining = delta_time;
        let mut resolved = false;
        loop {
            let limit = match self.phase {
                MotionPhase::Idle => break,
                MotionPhase::MovingToRange => self.approach_secs,
                MotionPhase::Resolving => self.attack_secs,
                MotionPhase::Returning => self.return_secs,
            };
            let needed = (limit - self.timer).max(0.0);
            if remaining < needed {
                self.timer += remaining;
                break;
            }
            remaining -= needed;
            self.timer = 0.0;
            self.phase = match self.phase {
                MotionPhase::MovingToRange => MotionPhase::Resolving,
                MotionPhase::Resolving => {
                    resolved = true;
                    if self.ranged {
                        MotionPhase::Idle
                    } else {
                        MotionPhase::Returning
                    }
                }
                MotionPhase::Returning | MotionPhase::Idle => MotionPhase::Idle,
            };
            trace!(phase = ?self.phase, "motion phase changed");
        }
        resolved
    }
}
