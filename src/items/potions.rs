use serde::{Deserialize, Serialize};

use crate::combat::types::Combatant;
use crate::core::error::{require_name, GameError, GameResult};
use crate::effects::Buff;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PotionEffect {
    Heal { healing_effect: u32 },
    Buff(Buff),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Potion {
    pub name: String,
    pub mana_consume: u32,
    pub uses: u32,
    pub effect: PotionEffect,
}

/// What a single drink did to its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PotionOutcome {
    Healed(u32),
    Buffed(Buff),
}

impl Potion {
    pub fn heal(
        name: impl Into<String>,
        mana_consume: u32,
        uses: u32,
        healing_effect: u32,
    ) -> GameResult<Self> {
        let name = name.into();
        if healing_effect == 0 {
            return Err(GameError::validation(
                &name,
                "healing_effect",
                "must be greater than 0",
            ));
        }
        Self::validated(name, mana_consume, uses, PotionEffect::Heal { healing_effect })
    }

    pub fn buff(
        name: impl Into<String>,
        mana_consume: u32,
        uses: u32,
        buff: Buff,
    ) -> GameResult<Self> {
        Self::validated(name.into(), mana_consume, uses, PotionEffect::Buff(buff))
    }

    fn validated(
        name: String,
        mana_consume: u32,
        uses: u32,
        effect: PotionEffect,
    ) -> GameResult<Self> {
        require_name(&name, "name")?;
        if uses == 0 {
            return Err(GameError::validation(&name, "uses", "must be greater than 0"));
        }
        Ok(Self {
            name,
            mana_consume,
            uses,
            effect,
        })
    }

    pub fn is_depleted(&self) -> bool {
        self.uses == 0
    }

    pub fn is_heal(&self) -> bool {
        matches!(self.effect, PotionEffect::Heal { .. })
    }

    /// Applies the potion to `target` and spends one use.
    ///
    /// Only heroes can drink potions. A depleted potion stays in its owner's
    /// set until the battle engine's post-action cleanup removes it.
    pub fn use_on(&mut self, target: &mut Combatant) -> GameResult<PotionOutcome> {
        if target.hero().is_none() {
            return Err(GameError::TypeMismatch {
                expected: "hero",
                found: "monster",
            });
        }
        if self.is_depleted() {
            return Err(GameError::PotionDepleted(self.name.clone()));
        }
        let outcome = match &self.effect {
            PotionEffect::Heal { healing_effect } => {
                PotionOutcome::Healed(target.heal(*healing_effect)?)
            }
            PotionEffect::Buff(buff) => PotionOutcome::Buffed(target.add_buff(buff.clone())),
        };
        self.uses -= 1;
        Ok(outcome)
    }
}
