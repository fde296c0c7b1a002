//! Per-turn broadcast payload.

use game_core::{EventKind, Snapshot};

/// Published after every resolved turn for sound and camera collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEvent {
    /// Turn counter after resolution.
    pub turn: u64,
    /// Name of the level the player ended the turn in.
    pub level: String,
    /// Event kinds raised this turn, in order.
    pub events: Vec<EventKind>,
}

impl TurnEvent {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            turn: snapshot.turn,
            level: snapshot.level.name().to_owned(),
            events: snapshot.events().to_vec(),
        }
    }
}
