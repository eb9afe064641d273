use super::types::{EquipmentSlot, Item, NUM_SLOTS};
use serde::{Deserialize, Serialize};

/// Combatant equipment, one optional item per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: [Option<Item>; NUM_SLOTS],
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slots[slot.index()].as_ref()
    }

    pub fn is_free(&self, slot: EquipmentSlot) -> bool {
        self.slots[slot.index()].is_none()
    }

    /// Places `item` in its slot, returning whatever was there before.
    pub fn set(&mut self, item: Item) -> Option<Item> {
        let index = item.slot.index();
        self.slots[index].replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slots[slot.index()].take()
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.get(EquipmentSlot::Weapon)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter().filter_map(|item| item.as_ref())
    }

    /// Sum of flat mitigation across equipped armor.
    pub fn armor_mitigation(&self) -> u32 {
        self.iter_equipped()
            .map(Item::mitigation)
            .fold(0u32, u32::saturating_add)
    }
}
