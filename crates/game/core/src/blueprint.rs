//! Parsed but not yet generated world data.
//!
//! Blueprints are produced by the loading collaborator from map and world
//! text and consumed once by [`Game::from_blueprint`](crate::Game::from_blueprint).

use crate::state::Position;

/// An entity placement listed after the `ENTITIES:` marker of a map file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub glyph: char,
    pub position: Position,
}

impl Placement {
    pub const fn new(glyph: char, position: Position) -> Self {
        Self { glyph, position }
    }
}

/// One level's raw grid rows plus its explicit entity placements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelBlueprint {
    pub name: String,
    pub rows: Vec<String>,
    pub placements: Vec<Placement>,
}

impl LevelBlueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_rows<I, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows = rows.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_placement(mut self, glyph: char, x: i32, y: i32) -> Self {
        self.placements.push(Placement::new(glyph, Position::new(x, y)));
        self
    }

    /// Widest row in characters; shorter rows are padded with void.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// One-way link from a cell in one level to a cell in another.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortalLink {
    pub from_level: String,
    pub from: Position,
    pub to_level: String,
    pub to: Position,
}

impl PortalLink {
    pub fn new(
        from_level: impl Into<String>,
        from: Position,
        to_level: impl Into<String>,
        to: Position,
    ) -> Self {
        Self {
            from_level: from_level.into(),
            from,
            to_level: to_level.into(),
            to,
        }
    }
}

/// Every level of a world, the level the player starts in, and the portals
/// linking them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldBlueprint {
    pub levels: Vec<LevelBlueprint>,
    pub start_level: String,
    pub portals: Vec<PortalLink>,
}

impl WorldBlueprint {
    pub fn new(start_level: impl Into<String>) -> Self {
        Self {
            start_level: start_level.into(),
            ..Self::default()
        }
    }

    /// Single-level world starting in `level`.
    pub fn single(level: LevelBlueprint) -> Self {
        Self {
            start_level: level.name.clone(),
            levels: vec![level],
            portals: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: LevelBlueprint) -> Self {
        self.levels.push(level);
        self
    }

    pub fn with_portal(mut self, portal: PortalLink) -> Self {
        self.portals.push(portal);
        self
    }
}
