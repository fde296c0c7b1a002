use std::collections::VecDeque;

use strum::{Display, EnumIter};

/// Kinds of notable things that happened during a turn.
///
/// The UI uses them to pick sounds; they carry no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Move,
    DoorOpen,
    DoorClose,
    Attack,
    Portal,
    PickUp,
    DropDown,
    Equip,
    TakeOff,
}

/// Rolling log of human-readable lines; only the newest `capacity` survive.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Lines from oldest to newest.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_only_the_newest_lines() {
        let mut log = EventLog::new(25);
        for index in 0..30 {
            log.push(format!("line {index}"));
        }
        assert_eq!(log.len(), 25);
        assert_eq!(log.lines().next(), Some("line 5"));
        assert_eq!(log.latest(), Some("line 29"));
    }
}
