//! Item-related state types.
//!
//! Items live in a single world-wide [`ItemArena`]. Containers (ground stacks,
//! inventories, equipment slots, storages) hold [`ItemId`]s, and every item
//! records where it currently is through [`ItemLocation`].

use strum::{Display, EnumIter};

use super::{ActorId, ItemId, LevelId, Position};

/// Category of an item; decides which equipment slot (if any) it fits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Weapon,
    Helmet,
    Armor,
    Other,
}

impl ItemKind {
    pub const fn slot(self) -> Option<EquipSlot> {
        match self {
            Self::Weapon => Some(EquipSlot::Weapon),
            Self::Helmet => Some(EquipSlot::Helmet),
            Self::Armor => Some(EquipSlot::Armor),
            Self::Other => None,
        }
    }
}

/// Equipment slot on a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipSlot {
    Helmet,
    Weapon,
    Armor,
}

/// The one container currently holding an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemLocation {
    Ground { level: LevelId, position: Position },
    Carried { owner: ActorId },
    Equipped { owner: ActorId, slot: EquipSlot },
    Stored { level: LevelId, position: Position },
}

/// A movable item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub glyph: char,
    pub kind: ItemKind,
    /// Combat multiplier: attack factor for weapons, damage reduction for
    /// helmets and armor.
    pub power: f64,
    location: ItemLocation,
}

impl Item {
    pub fn location(&self) -> ItemLocation {
        self.location
    }

    /// Ground position, if the item is lying on the ground.
    pub fn position(&self) -> Option<Position> {
        match self.location {
            ItemLocation::Ground { position, .. } => Some(position),
            _ => None,
        }
    }
}

/// Arena of every item in the world, indexed by [`ItemId`].
///
/// Items are never removed, so ids stay valid for the lifetime of the world.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemArena {
    items: Vec<Item>,
}

impl ItemArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn spawn(
        &mut self,
        name: impl Into<String>,
        glyph: char,
        kind: ItemKind,
        power: f64,
        location: ItemLocation,
    ) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(Item {
            id,
            name: name.into(),
            glyph,
            kind,
            power,
            location,
        });
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.index())
    }

    pub fn power(&self, id: ItemId) -> Option<f64> {
        self.get(id).map(|item| item.power)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }

    /// Records a container change. Callers edit the container lists in the
    /// same operation so the tag and the lists never disagree.
    pub(crate) fn relocate(&mut self, id: ItemId, location: ItemLocation) {
        if let Some(item) = self.items.get_mut(id.index()) {
            item.location = location;
        }
    }
}
