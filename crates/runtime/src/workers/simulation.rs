//! Simulation worker that owns the authoritative [`game_core::Game`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), resolves
//! one input at a time, and broadcasts a [`TurnEvent`] per resolved turn.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, error, info, warn};

use game_core::{Game, GameError, Input, Snapshot, TurnOutcome};

use crate::events::TurnEvent;

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Resolve one input and reply with the resulting outcome.
    Submit {
        input: Input,
        reply: oneshot::Sender<TurnOutcome>,
    },
    /// Query the latest snapshot (read-only).
    Snapshot { reply: oneshot::Sender<Snapshot> },
    /// Stop after the commands queued ahead of this one.
    Shutdown,
}

/// Background task that processes gameplay commands.
///
/// Inputs are resolved strictly in arrival order; a turn is fully resolved
/// before the next command is read.
pub struct SimulationWorker {
    game: Game,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<TurnEvent>,
}

impl SimulationWorker {
    /// Creates a new simulation worker and publishes the opening snapshot.
    pub fn new(
        mut game: Game,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<TurnEvent>,
    ) -> Self {
        let snapshot = game.start();
        info!(
            target: "runtime::worker",
            level = snapshot.level.name(),
            levels = game.levels().len(),
            "SimulationWorker initialized"
        );

        Self {
            game,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Ends on `Quit`, on `Shutdown`, or once every handle
    /// is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            if !self.handle_command(cmd) {
                break;
            }
        }
        info!(target: "runtime::worker", turn = self.game.turn(), "SimulationWorker stopped");
    }

    /// Returns false once the worker should stop.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Submit { input, reply } => {
                let outcome = self.resolve(input);
                let keep_running = !matches!(outcome, TurnOutcome::Quit);
                if !keep_running {
                    // Refuse further commands before the caller hears back.
                    self.command_rx.close();
                }
                if reply.send(outcome).is_err() {
                    debug!(target: "runtime::worker", "Submit reply channel closed (caller dropped)");
                }
                keep_running
            }
            Command::Snapshot { reply } => {
                if reply.send(self.game.snapshot()).is_err() {
                    debug!(target: "runtime::worker", "Snapshot reply channel closed (caller dropped)");
                }
                true
            }
            Command::Shutdown => {
                info!(target: "runtime::worker", "shutdown requested");
                self.command_rx.close();
                false
            }
        }
    }

    fn resolve(&mut self, input: Input) -> TurnOutcome {
        debug!(target: "runtime::worker", ?input, turn = self.game.turn(), "resolving input");

        let was_over = self.game.is_over();
        let outcome = self.game.handle_input(input);
        if matches!(outcome, TurnOutcome::Quit) {
            info!(target: "runtime::worker", "quit requested");
            return outcome;
        }

        if let Err(violation) = self.game.check_integrity() {
            error!(
                target: "runtime::worker",
                code = violation.error_code(),
                %violation,
                "world integrity violated"
            );
        }

        if let Some(snapshot) = outcome.snapshot() {
            if snapshot.over && !was_over {
                warn!(target: "runtime::worker", turn = snapshot.turn, "player died");
            }
            // No subscribers is fine.
            let _ = self.event_tx.send(TurnEvent::from_snapshot(snapshot));
        }
        outcome
    }
}
