use std::collections::{HashSet, VecDeque};

use arrayvec::ArrayVec;

use super::{Position, TerrainKind, Tile};

/// Up to four orthogonal neighbours of a cell.
pub type Neighbors = ArrayVec<Position, 4>;

/// Rectangular tile grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with void tiles.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width: width as i32,
            height: height as i32,
            tiles: vec![Tile::VOID; len],
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    fn offset(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| (position.y * self.width + position.x) as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.offset(position).map(|index| &self.tiles[index])
    }

    pub(crate) fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.offset(position).map(move |index| &mut self.tiles[index])
    }

    pub(crate) fn set(&mut self, position: Position, tile: Tile) {
        if let Some(slot) = self.tile_mut(position) {
            *slot = tile;
        }
    }

    /// Out-of-bounds cells are never walkable.
    pub fn can_walk(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::can_walk)
    }

    /// Out-of-bounds cells are opaque.
    pub fn can_see_through(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::can_see)
    }

    /// Iterates `(position, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let index = index as i32;
            (Position::new(index % width, index / width), tile)
        })
    }

    /// Walkable orthogonal neighbours in the order left, right, up, down.
    pub fn walkable_neighbors(&self, position: Position) -> Neighbors {
        [
            position.offset(-1, 0),
            position.offset(1, 0),
            position.offset(0, -1),
            position.offset(0, 1),
        ]
        .into_iter()
        .filter(|next| self.can_walk(*next))
        .collect()
    }

    pub(crate) fn open_door(&mut self, position: Position) -> bool {
        self.tile_mut(position).is_some_and(Tile::open_door)
    }

    pub(crate) fn close_door(&mut self, position: Position) -> bool {
        self.tile_mut(position).is_some_and(Tile::close_door)
    }

    pub(crate) fn clear_visibility(&mut self) {
        self.tiles.iter_mut().for_each(Tile::hide);
    }

    /// Replaces every pending terrain with the nearest reachable floor.
    pub(crate) fn resolve_pending_floors(&mut self) {
        let pending: Vec<Position> = self
            .iter()
            .filter(|(_, tile)| tile.is_pending())
            .map(|(position, _)| position)
            .collect();

        for position in pending {
            let floor = self.nearest_floor(position);
            if let Some(tile) = self.tile_mut(position) {
                tile.set_terrain(floor);
            }
        }
    }

    /// Breadth-first search over walkable cells for the first concrete floor.
    fn nearest_floor(&self, start: Position) -> TerrainKind {
        let mut frontier = VecDeque::from([start]);
        let mut visited = HashSet::from([start]);

        while let Some(current) = frontier.pop_front() {
            if let Some(tile) = self.tile(current) {
                if tile.terrain().is_floor() {
                    return tile.terrain();
                }
            }

            for next in self.walkable_neighbors(current) {
                if visited.insert(next) {
                    frontier.push_back(next);
                }
            }
        }

        TerrainKind::FALLBACK_FLOOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from(rows: &[&str]) -> Grid {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Grid::new(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let tile = Tile::from_glyph(glyph).unwrap_or_else(Tile::entity_floor);
                grid.set(Position::new(x as i32, y as i32), tile);
            }
        }
        grid
    }

    #[test]
    fn out_of_bounds_is_blocked_and_opaque() {
        let grid = grid_from(&["..."]);
        assert!(!grid.can_walk(Position::new(-1, 0)));
        assert!(!grid.can_walk(Position::new(3, 0)));
        assert!(!grid.can_see_through(Position::new(0, 1)));
    }

    #[test]
    fn neighbors_come_in_left_right_up_down_order() {
        let grid = grid_from(&["...", "...", "..."]);
        let neighbors = grid.walkable_neighbors(Position::new(1, 1));
        assert_eq!(
            neighbors.as_slice(),
            &[
                Position::new(0, 1),
                Position::new(2, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn pending_door_takes_floor_from_neighbours() {
        let mut grid = grid_from(&["#_#", "#|#", "#_#"]);
        grid.resolve_pending_floors();
        let door = grid.tile(Position::new(1, 1)).unwrap();
        assert_eq!(door.terrain(), TerrainKind::StoneFloor);
        assert_eq!(door.overlay(), Some(super::super::Overlay::ClosedDoor));
    }

    #[test]
    fn pending_search_walks_through_other_pending_tiles() {
        let mut grid = grid_from(&["#####", "#|/_#", "#####"]);
        grid.resolve_pending_floors();
        assert_eq!(
            grid.tile(Position::new(1, 1)).unwrap().terrain(),
            TerrainKind::StoneFloor
        );
    }

    #[test]
    fn isolated_pending_tile_falls_back_to_dirt() {
        let mut grid = grid_from(&["###", "#|#", "###"]);
        grid.resolve_pending_floors();
        assert_eq!(
            grid.tile(Position::new(1, 1)).unwrap().terrain(),
            TerrainKind::FALLBACK_FLOOR
        );
    }
}
