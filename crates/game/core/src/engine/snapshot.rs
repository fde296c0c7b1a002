use crate::level::{EventKind, Level};
use crate::state::{Character, Item, ItemArena, ItemId, Position};

/// Read-only view of the world published after every turn.
///
/// Holds the active level (grid, monsters, ground stacks, storages, log and
/// this turn's event kinds), the player and the item arena.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub turn: u64,
    pub level: Level,
    pub player: Character,
    pub items: ItemArena,
    /// The player has died.
    pub over: bool,
}

impl Snapshot {
    pub const CORPSE_GLYPH: char = '&';

    pub fn events(&self) -> &[EventKind] {
        self.level.events()
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Items lying under the player.
    pub fn items_at_feet(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items_at(self.player.position)
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &Item> + '_ {
        self.level
            .items_at(position)
            .iter()
            .filter_map(|id| self.items.get(*id))
    }

    pub fn inventory(&self) -> impl Iterator<Item = &Item> + '_ {
        self.player
            .inventory
            .iter()
            .filter_map(|id| self.items.get(*id))
    }

    /// Glyph a text renderer would draw at `position`: player, living
    /// monster, storage, top ground item, corpse, then terrain. Cells never
    /// seen render blank.
    pub fn glyph_at(&self, position: Position) -> char {
        let Some(tile) = self.level.grid().tile(position) else {
            return ' ';
        };
        if !tile.is_visited() {
            return ' ';
        }
        if position == self.player.position {
            return self.player.glyph;
        }
        if tile.is_visible() {
            if let Some((_, monster)) = self.level.monster_at(position) {
                return monster.glyph;
            }
        }
        if let Some(storage) = self.level.storage_at(position) {
            return storage.glyph;
        }
        if let Some(item) = self.items_at(position).last() {
            return item.glyph;
        }
        if self
            .level
            .corpses()
            .any(|corpse| corpse.position == position)
        {
            return Self::CORPSE_GLYPH;
        }
        tile.glyph()
    }

    /// Renders the whole level, one string per row.
    pub fn render(&self) -> Vec<String> {
        let grid = self.level.grid();
        (0..grid.height() as i32)
            .map(|y| {
                (0..grid.width() as i32)
                    .map(|x| self.glyph_at(Position::new(x, y)))
                    .collect()
            })
            .collect()
    }
}
