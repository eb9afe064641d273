//! Builds live entities from plain data records.

pub mod build;
pub mod loader;
pub mod records;

pub use build::{
    create_armor, create_buff, create_character, create_monster, create_poison, create_potion,
    create_projectile, create_weapon,
};
pub use loader::GameData;
pub use records::*;
