//! Player input commands accepted by the engine.
//!
//! The UI collaborator translates key presses and drag-and-drop gestures into
//! an [`Input`]; the engine resolves exactly one input per turn.

use strum::{Display, EnumIter};

use crate::state::ItemId;

/// Orthogonal step direction. `Up` decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A single command from the UI collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Step, attack or bump-open a door.
    Move(Direction),
    /// Context-sensitive use: attack, or toggle a door.
    Action(Direction),
    TakeItem(ItemId),
    TakeAllAtFeet,
    DropItem(ItemId),
    EquipItem(ItemId),
    TakeOffItem(ItemId),
    StoreItem(ItemId),
    WithdrawItem(ItemId),
    Quit,
}

impl Input {
    /// Inputs that spend the player's turn and let monsters act.
    pub const fn is_turn_action(&self) -> bool {
        matches!(self, Input::Move(_) | Input::Action(_))
    }

    pub const fn is_quit(&self) -> bool {
        matches!(self, Input::Quit)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::state::Position;

    #[test]
    fn opposite_directions_cancel_out() {
        let origin = Position::new(5, 5);
        for direction in Direction::iter() {
            let (dx, dy) = direction.delta();
            assert_eq!(origin.step(direction).manhattan(origin), 1);
            assert_eq!(origin.offset(dx, dy).offset(-dx, -dy), origin);
        }
        assert_eq!(origin.step(Direction::Up), Position::new(5, 4));
        assert_eq!(origin.step(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn only_movement_and_action_take_a_turn() {
        assert!(Input::Move(Direction::Up).is_turn_action());
        assert!(Input::Action(Direction::Left).is_turn_action());
        assert!(!Input::TakeAllAtFeet.is_turn_action());
        assert!(!Input::DropItem(ItemId(0)).is_turn_action());
        assert!(Input::Quit.is_quit());
    }
}
