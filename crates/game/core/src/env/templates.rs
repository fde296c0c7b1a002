//! Template definitions spawned into characters, items and storages.

use crate::state::ItemKind;

/// Stats shared by the player and every monster species.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub name: String,
    pub glyph: char,
    pub hitpoints: i32,
    pub strength: i32,
    pub speed: f64,
    #[cfg_attr(feature = "serde", serde(default = "CharacterTemplate::default_sight"))]
    pub sight_range: i32,
}

impl CharacterTemplate {
    pub const DEFAULT_SIGHT_RANGE: i32 = 7;

    pub fn new(name: impl Into<String>, glyph: char, hitpoints: i32, strength: i32, speed: f64) -> Self {
        Self {
            name: name.into(),
            glyph,
            hitpoints,
            strength,
            speed,
            sight_range: Self::DEFAULT_SIGHT_RANGE,
        }
    }

    pub fn with_sight_range(mut self, sight_range: i32) -> Self {
        self.sight_range = sight_range;
        self
    }

    #[cfg(feature = "serde")]
    fn default_sight() -> i32 {
        Self::DEFAULT_SIGHT_RANGE
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTemplate {
    pub name: String,
    pub glyph: char,
    pub kind: ItemKind,
    pub power: f64,
}

impl ItemTemplate {
    pub fn new(name: impl Into<String>, glyph: char, kind: ItemKind, power: f64) -> Self {
        Self {
            name: name.into(),
            glyph,
            kind,
            power,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageTemplate {
    pub name: String,
    pub glyph: char,
    #[cfg_attr(feature = "serde", serde(default))]
    pub locked: bool,
}

impl StorageTemplate {
    pub fn new(name: impl Into<String>, glyph: char, locked: bool) -> Self {
        Self {
            name: name.into(),
            glyph,
            locked,
        }
    }
}
