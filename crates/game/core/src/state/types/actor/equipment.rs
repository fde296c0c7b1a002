//! Equipment system for characters.
//!
//! Three mutually exclusive slots. Slots reference items by [`ItemId`]; the
//! item data itself lives in the [`ItemArena`](crate::state::ItemArena).

use crate::state::types::{EquipSlot, ItemId};

/// Equipment state for a character.
///
/// An item referenced here is not part of the owner's inventory list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub helmet: Option<ItemId>,
    pub weapon: Option<ItemId>,
    pub armor: Option<ItemId>,
}

impl Equipment {
    /// Creates empty equipment (nothing worn or wielded).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing equipment.
    pub fn builder() -> EquipmentBuilder {
        EquipmentBuilder::default()
    }

    pub fn get(&self, slot: EquipSlot) -> Option<ItemId> {
        match slot {
            EquipSlot::Helmet => self.helmet,
            EquipSlot::Weapon => self.weapon,
            EquipSlot::Armor => self.armor,
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<ItemId> {
        match slot {
            EquipSlot::Helmet => &mut self.helmet,
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
        }
    }

    /// Puts `item` in `slot`, returning the previous occupant if any.
    pub fn replace(&mut self, slot: EquipSlot, item: ItemId) -> Option<ItemId> {
        self.slot_mut(slot).replace(item)
    }

    /// Empties `slot`, returning what it held.
    pub fn take(&mut self, slot: EquipSlot) -> Option<ItemId> {
        self.slot_mut(slot).take()
    }

    /// Slot currently holding `item`, if any.
    pub fn slot_of(&self, item: ItemId) -> Option<EquipSlot> {
        [EquipSlot::Helmet, EquipSlot::Weapon, EquipSlot::Armor]
            .into_iter()
            .find(|slot| self.get(*slot) == Some(item))
    }

    /// Iterates `(slot, item)` for every filled slot.
    pub fn iter(&self) -> impl Iterator<Item = (EquipSlot, ItemId)> + '_ {
        [EquipSlot::Helmet, EquipSlot::Weapon, EquipSlot::Armor]
            .into_iter()
            .filter_map(|slot| self.get(slot).map(|item| (slot, item)))
    }
}

/// Builder for constructing equipment.
#[derive(Default)]
pub struct EquipmentBuilder {
    helmet: Option<ItemId>,
    weapon: Option<ItemId>,
    armor: Option<ItemId>,
}

impl EquipmentBuilder {
    pub fn helmet(mut self, item: ItemId) -> Self {
        self.helmet = Some(item);
        self
    }

    pub fn weapon(mut self, item: ItemId) -> Self {
        self.weapon = Some(item);
        self
    }

    pub fn armor(mut self, item: ItemId) -> Self {
        self.armor = Some(item);
        self
    }

    pub fn build(self) -> Equipment {
        Equipment {
            helmet: self.helmet,
            weapon: self.weapon,
            armor: self.armor,
        }
    }
}
