//! Field-of-view by integer line casting.
//!
//! Every turn the visible set is rebuilt from scratch: all `VISIBLE` flags are
//! cleared, then a Bresenham line is cast from the viewer to every cell of a
//! disk around it. Cast cells become visible and visited; a cast stops on the
//! first opaque cell, which itself stays visible.

use crate::state::{Grid, Position};

/// Recomputes visibility around `origin`.
///
/// The disk radius is `sight_range + padding` with a strict
/// `dx² + dy² < radius²` test. An extra cast straight south to
/// `sight_range` cells always runs after the disk sweep.
pub fn refresh(grid: &mut Grid, origin: Position, sight_range: i32, padding: i32) {
    grid.clear_visibility();

    let radius = sight_range + padding;
    for y in origin.y - radius..=origin.y + radius {
        for x in origin.x - radius..=origin.x + radius {
            let target = Position::new(x, y);
            if origin.distance_squared(target) < radius * radius {
                cast(grid, origin, target);
            }
        }
    }

    cast(grid, origin, origin.offset(0, sight_range));
}

/// Walks the Bresenham line from `start` towards `end`, excluding `end`.
///
/// Steep lines swap axes so the major axis is always `x`; lines running
/// right-to-left step `x` backwards. Leaving the grid ends the cast.
pub fn cast(grid: &mut Grid, start: Position, end: Position) {
    let steep = (end.y - start.y).abs() > (end.x - start.x).abs();
    let (start, end) = if steep {
        (Position::new(start.y, start.x), Position::new(end.y, end.x))
    } else {
        (start, end)
    };

    let delta_x = (end.x - start.x).abs();
    let delta_y = (end.y - start.y).abs();
    let x_step = if start.x > end.x { -1 } else { 1 };
    let y_step = if start.y < end.y { 1 } else { -1 };

    let mut error = 0;
    let mut y = start.y;
    let mut x = start.x;
    while x != end.x {
        let cell = if steep {
            Position::new(y, x)
        } else {
            Position::new(x, y)
        };

        let Some(tile) = grid.tile_mut(cell) else {
            return;
        };
        tile.mark_seen();
        if !tile.can_see() {
            return;
        }

        error += delta_y;
        if 2 * error >= delta_x {
            y += y_step;
            error -= delta_x;
        }
        x += x_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Tile;

    fn grid_from(rows: &[&str]) -> Grid {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let mut grid = Grid::new(width as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let tile = Tile::from_glyph(glyph).unwrap_or_else(Tile::entity_floor);
                grid.set(Position::new(x as i32, y as i32), tile);
            }
        }
        grid
    }

    fn visible(grid: &Grid, x: i32, y: i32) -> bool {
        grid.tile(Position::new(x, y)).is_some_and(Tile::is_visible)
    }

    #[test]
    fn cast_excludes_its_end_cell() {
        let mut grid = grid_from(&["......"]);
        cast(&mut grid, Position::new(0, 0), Position::new(3, 0));
        assert!(visible(&grid, 0, 0));
        assert!(visible(&grid, 2, 0));
        assert!(!visible(&grid, 3, 0));
    }

    #[test]
    fn cast_runs_backwards_for_leftward_lines() {
        let mut grid = grid_from(&["......"]);
        cast(&mut grid, Position::new(5, 0), Position::new(1, 0));
        assert!(visible(&grid, 5, 0));
        assert!(visible(&grid, 2, 0));
        assert!(!visible(&grid, 1, 0));
    }

    #[test]
    fn opaque_cell_is_seen_but_stops_the_cast() {
        let mut grid = grid_from(&["..#..."]);
        cast(&mut grid, Position::new(0, 0), Position::new(5, 0));
        assert!(visible(&grid, 2, 0));
        assert!(!visible(&grid, 3, 0));
    }

    #[test]
    fn steep_cast_walks_along_y() {
        let mut grid = grid_from(&[".", ".", ".", "."]);
        cast(&mut grid, Position::new(0, 3), Position::new(0, 0));
        assert!(visible(&grid, 0, 3));
        assert!(visible(&grid, 0, 1));
        assert!(!visible(&grid, 0, 0));
    }

    #[test]
    fn wall_hides_the_cell_directly_behind_it() {
        let mut grid = grid_from(&[
            "...........",
            "...........",
            ".....#.....",
            "...........",
            "...........",
        ]);
        refresh(&mut grid, Position::new(5, 4), 7, 2);
        assert!(visible(&grid, 5, 2));
        assert!(!visible(&grid, 5, 1));
        assert!(!visible(&grid, 5, 0));
        assert!(visible(&grid, 0, 0));
    }

    #[test]
    fn southward_cast_reaches_one_row_past_the_disk() {
        let mut grid = grid_from(&[".", ".", ".", ".", ".", ".", "."]);
        refresh(&mut grid, Position::new(0, 3), 4, 0);

        assert!(visible(&grid, 0, 6));
        assert!(visible(&grid, 0, 1));
        assert!(!visible(&grid, 0, 0));
    }

    #[test]
    fn refresh_clears_visible_but_keeps_visited() {
        let mut grid = grid_from(&["....................................."]);
        refresh(&mut grid, Position::new(0, 0), 3, 2);
        assert!(visible(&grid, 3, 0));

        refresh(&mut grid, Position::new(36, 0), 3, 2);
        let tile = grid.tile(Position::new(3, 0)).unwrap();
        assert!(!tile.is_visible());
        assert!(tile.is_visited());
    }
}
