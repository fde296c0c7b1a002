//! Characters shared by the player and monsters.

mod equipment;

pub use equipment::{Equipment, EquipmentBuilder};

use crate::env::CharacterTemplate;
use crate::state::types::{ActorId, ItemId, Position};

/// Complete character state: stats, action points, gear and inventory.
///
/// The player and every monster use the same type; [`ActorId`] tells them
/// apart and tags items they carry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub actor: ActorId,
    pub name: String,
    pub glyph: char,
    pub position: Position,

    /// May drop below zero; death is `hitpoints <= 0`.
    pub hitpoints: i32,
    pub strength: i32,
    /// Action points gained per tick.
    pub speed: f64,
    pub action_points: f64,
    pub sight_range: i32,

    pub equipment: Equipment,
    /// Held items that are neither equipped nor on the ground.
    pub inventory: Vec<ItemId>,
}

impl Character {
    /// Create a character from a template, standing at `position` with an
    /// empty action-point pool.
    pub fn from_template(actor: ActorId, template: &CharacterTemplate, position: Position) -> Self {
        Self {
            actor,
            name: template.name.clone(),
            glyph: template.glyph,
            position,
            hitpoints: template.hitpoints,
            strength: template.strength,
            speed: template.speed,
            action_points: 0.0,
            sight_range: template.sight_range,
            equipment: Equipment::empty(),
            inventory: Vec::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hitpoints > 0
    }

    pub fn holds(&self, item: ItemId) -> bool {
        self.inventory.contains(&item)
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }
}
