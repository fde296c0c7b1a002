//! Asynchronous abstraction for sourcing player intent.
//!
//! Runtime users plug in [`InputProvider`] implementations so the simulation
//! can run with human input, scripted fixtures, or replayed sessions.
use std::collections::VecDeque;

use async_trait::async_trait;
use game_core::{Input, Snapshot};
use tokio::sync::Mutex;

use super::errors::Result;

/// Trait for providing the next input based on the latest snapshot.
///
/// Different implementations can handle:
/// - Player input (from a terminal or UI)
/// - Scripted/replayed inputs
/// - Testing fixtures
#[async_trait]
pub trait InputProvider: Send + Sync {
    /// Provide the next input given what the player currently sees.
    async fn next_input(&self, snapshot: &Snapshot) -> Result<Input>;
}

/// Replays a fixed list of inputs, then quits.
pub struct ScriptedInputProvider {
    inputs: Mutex<VecDeque<Input>>,
}

impl ScriptedInputProvider {
    pub fn new(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inputs: Mutex::new(inputs.into_iter().collect()),
        }
    }
}

#[async_trait]
impl InputProvider for ScriptedInputProvider {
    async fn next_input(&self, _snapshot: &Snapshot) -> Result<Input> {
        Ok(self.inputs.lock().await.pop_front().unwrap_or(Input::Quit))
    }
}
