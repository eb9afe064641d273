//! Error taxonomy for entity construction, equipment and data loading.
//!
//! In-combat illegal actions are not errors: the battle engine absorbs them
//! as no-ops. Everything here is either fatal at startup (validation, unknown
//! class, bad data files) or recoverable by the caller (equip conflicts).

use thiserror::Error;

use crate::items::types::EquipmentSlot;

#[derive(Debug, Error)]
pub enum GameError {
    /// A field failed construction-time validation.
    #[error("invalid {field} on '{entity}': {reason}")]
    Validation {
        entity: String,
        field: &'static str,
        reason: String,
    },

    /// The item's slot is already occupied.
    #[error("cannot equip into {slot}: slot already holds '{occupant}'")]
    InvalidEquip {
        slot: EquipmentSlot,
        occupant: String,
    },

    /// The item passed to unequip is not the one in its slot.
    #[error("'{item}' is not equipped in {slot}")]
    NotEquipped { item: String, slot: EquipmentSlot },

    #[error("invalid amount {amount} for {operation}")]
    InvalidAmount {
        operation: &'static str,
        amount: u32,
    },

    #[error("expected a {expected} target, found a {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("potion '{0}' has no uses left")]
    PotionDepleted(String),

    #[error("unknown {kind} class '{tag}'")]
    UnknownClass { kind: &'static str, tag: String },

    #[error("record '{record}' references unknown {field} '{name}'")]
    UnknownReference {
        record: String,
        field: &'static str,
        name: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed data file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn validation(entity: &str, field: &'static str, reason: impl Into<String>) -> Self {
        GameError::Validation {
            entity: entity.to_string(),
            field,
            reason: reason.into(),
        }
    }
}

/// Rejects empty names with a validation error on `field`.
pub fn require_name(name: &str, field: &'static str) -> GameResult<()> {
    if name.trim().is_empty() {
        return Err(GameError::validation(name, field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = GameError::validation("Axe", "weight", "must not be negative");
        let msg = err.to_string();
        assert!(msg.contains("weight"));
        assert!(msg.contains("Axe"));
    }

    #[test]
    fn test_require_name_rejects_blank() {
        assert!(require_name("", "name").is_err());
        assert!(require_name("   ", "name").is_err());
        assert!(require_name("Goblin", "name").is_ok());
    }

    #[test]
    fn test_invalid_equip_display() {
        let err = GameError::InvalidEquip {
            slot: EquipmentSlot::Weapon,
            occupant: "Sword".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cannot equip into weapon: slot already holds 'Sword'"
        );
    }
}
