//! Weighted A* over the four-connected walkable grid.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::state::{Grid, Position};

/// Finds a cheapest path from `start` to `goal`.
///
/// `step_cost` prices entering a cell. The heuristic is Manhattan distance,
/// which stays admissible as long as every step costs at least 1. Frontier
/// entries with equal priority pop in insertion order.
///
/// Returns the cells after `start` up to and including `goal`, or `None` when
/// the goal is unreachable. A path to `start` itself is empty.
pub fn find_path<F>(grid: &Grid, start: Position, goal: Position, step_cost: F) -> Option<Vec<Position>>
where
    F: Fn(Position) -> u32,
{
    let mut frontier = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::from([(start, start)]);
    let mut cost_so_far: HashMap<Position, u32> = HashMap::from([(start, 0)]);
    let mut sequence: u64 = 0;

    frontier.push(Reverse((0u32, sequence, start)));

    while let Some(Reverse((_, _, current))) = frontier.pop() {
        if current == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        let current_cost = cost_so_far.get(&current).copied().unwrap_or_default();
        for next in grid.walkable_neighbors(current) {
            let new_cost = current_cost + step_cost(next);
            let improved = cost_so_far
                .get(&next)
                .is_none_or(|known| new_cost < *known);
            if improved {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current);
                sequence += 1;
                frontier.push(Reverse((new_cost + next.manhattan(goal), sequence, next)));
            }
        }
    }

    None
}

fn reconstruct(came_from: &HashMap<Position, Position>, start: Position, goal: Position) -> Vec<Position> {
    let mut path = Vec::new();
    let mut current = goal;
    while current != start {
        path.push(current);
        match came_from.get(&current) {
            Some(previous) => current = *previous,
            None => break,
        }
    }
    path.reverse();
    path
}

/// Total cost of walking `path`, priced by the same closure as [`find_path`].
pub fn path_cost<F>(path: &[Position], step_cost: F) -> u32
where
    F: Fn(Position) -> u32,
{
    path.iter().map(|cell| step_cost(*cell)).sum()
}
