//! Per-cell terrain, overlays and derived walk/see flags.

use bitflags::bitflags;

bitflags! {
    /// Derived and transient per-tile flags.
    ///
    /// `WALKABLE` and `TRANSPARENT` are fixed at generation except for doors.
    /// `VISIBLE` is rebuilt every turn; `VISITED` is never cleared.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        const WALKABLE = 1;
        const TRANSPARENT = 1 << 1;
        const VISIBLE = 1 << 2;
        const VISITED = 1 << 3;
    }
}

/// Base terrain of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Void,
    DirtFloor,
    StoneFloor,
    StoneWall,
    OldStoneWall,
    /// Floor not yet known; resolved from the surrounding floor after generation.
    Pending,
}

impl TerrainKind {
    /// Terrain used when a pending tile has no reachable floor.
    pub const FALLBACK_FLOOR: Self = Self::DirtFloor;

    pub const fn glyph(self) -> char {
        match self {
            Self::Void => ' ',
            Self::DirtFloor => '.',
            Self::StoneFloor => '_',
            Self::StoneWall => '#',
            Self::OldStoneWall => '%',
            Self::Pending => '?',
        }
    }

    pub const fn is_floor(self) -> bool {
        matches!(self, Self::DirtFloor | Self::StoneFloor)
    }
}

/// Secondary rune drawn on top of the base terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overlay {
    ClosedDoor,
    OpenedDoor,
    UpStair,
    DownStair,
    StonePillar,
}

impl Overlay {
    pub const fn glyph(self) -> char {
        match self {
            Self::ClosedDoor => '|',
            Self::OpenedDoor => '/',
            Self::UpStair => '<',
            Self::DownStair => '>',
            Self::StonePillar => 'O',
        }
    }
}

/// One grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    terrain: TerrainKind,
    overlay: Option<Overlay>,
    flags: TileFlags,
}

impl Tile {
    pub const VOID: Self = Self::new(TerrainKind::Void, None, TileFlags::TRANSPARENT);

    pub const fn new(terrain: TerrainKind, overlay: Option<Overlay>, flags: TileFlags) -> Self {
        Self {
            terrain,
            overlay,
            flags,
        }
    }

    /// Pending-floor tile hosting an entity placed directly in the grid.
    pub const fn entity_floor() -> Self {
        Self::new(
            TerrainKind::Pending,
            None,
            TileFlags::WALKABLE.union(TileFlags::TRANSPARENT),
        )
    }

    /// Classifies a terrain glyph. Returns `None` for glyphs that are not
    /// terrain (entity placements or unknown characters).
    pub fn from_glyph(glyph: char) -> Option<Self> {
        let open = TileFlags::WALKABLE.union(TileFlags::TRANSPARENT);
        let tile = match glyph {
            ' ' | '\t' | '\r' | '\n' => Self::VOID,
            '.' => Self::new(TerrainKind::DirtFloor, None, open),
            '_' => Self::new(TerrainKind::StoneFloor, None, open),
            '#' => Self::new(TerrainKind::StoneWall, None, TileFlags::empty()),
            '%' => Self::new(TerrainKind::OldStoneWall, None, TileFlags::empty()),
            '|' => Self::new(
                TerrainKind::Pending,
                Some(Overlay::ClosedDoor),
                TileFlags::empty(),
            ),
            '/' => Self::new(TerrainKind::Pending, Some(Overlay::OpenedDoor), open),
            '<' => Self::new(TerrainKind::Pending, Some(Overlay::UpStair), open),
            '>' => Self::new(TerrainKind::Pending, Some(Overlay::DownStair), open),
            'O' => Self::new(
                TerrainKind::Pending,
                Some(Overlay::StonePillar),
                TileFlags::TRANSPARENT,
            ),
            _ => return None,
        };
        Some(tile)
    }

    pub fn terrain(&self) -> TerrainKind {
        self.terrain
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    /// Glyph a renderer would draw: the overlay if present, else the terrain.
    pub fn glyph(&self) -> char {
        self.overlay
            .map(Overlay::glyph)
            .unwrap_or_else(|| self.terrain.glyph())
    }

    #[inline]
    pub fn can_walk(&self) -> bool {
        self.flags.contains(TileFlags::WALKABLE)
    }

    #[inline]
    pub fn can_see(&self) -> bool {
        self.flags.contains(TileFlags::TRANSPARENT)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.flags.contains(TileFlags::VISIBLE)
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.flags.contains(TileFlags::VISITED)
    }

    pub fn is_pending(&self) -> bool {
        self.terrain == TerrainKind::Pending
    }

    pub(crate) fn set_terrain(&mut self, terrain: TerrainKind) {
        self.terrain = terrain;
    }

    pub(crate) fn mark_seen(&mut self) {
        self.flags.insert(TileFlags::VISIBLE | TileFlags::VISITED);
    }

    pub(crate) fn hide(&mut self) {
        self.flags.remove(TileFlags::VISIBLE);
    }

    /// Opens a closed door. Returns whether a transition occurred.
    pub(crate) fn open_door(&mut self) -> bool {
        if self.overlay != Some(Overlay::ClosedDoor) {
            return false;
        }
        self.overlay = Some(Overlay::OpenedDoor);
        self.flags.insert(TileFlags::WALKABLE | TileFlags::TRANSPARENT);
        true
    }

    /// Closes an open door. Returns whether a transition occurred.
    pub(crate) fn close_door(&mut self) -> bool {
        if self.overlay != Some(Overlay::OpenedDoor) {
            return false;
        }
        self.overlay = Some(Overlay::ClosedDoor);
        self.flags.remove(TileFlags::WALKABLE | TileFlags::TRANSPARENT);
        true
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::VOID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_block_walking_and_sight() {
        let wall = Tile::from_glyph('#').unwrap();
        assert!(!wall.can_walk());
        assert!(!wall.can_see());
    }

    #[test]
    fn pillar_blocks_walking_but_not_sight() {
        let pillar = Tile::from_glyph('O').unwrap();
        assert!(pillar.is_pending());
        assert!(!pillar.can_walk());
        assert!(pillar.can_see());
    }

    #[test]
    fn door_toggles_flip_both_flags() {
        let mut door = Tile::from_glyph('|').unwrap();
        assert!(!door.close_door());
        assert!(door.open_door());
        assert_eq!(door.overlay(), Some(Overlay::OpenedDoor));
        assert!(door.can_walk() && door.can_see());
        assert!(!door.open_door());
        assert!(door.close_door());
        assert!(!door.can_walk() && !door.can_see());
    }

    #[test]
    fn entity_glyphs_are_not_terrain() {
        assert!(Tile::from_glyph('R').is_none());
        assert!(Tile::from_glyph('@').is_none());
    }
}
