//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! submitting inputs, reading the latest snapshot, or streaming turn events.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Input, Snapshot, TurnOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::TurnEvent;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<TurnEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<TurnEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Submit one input and wait for the turn it triggers to resolve.
    ///
    /// `Quit` stops the worker; later calls fail with
    /// [`RuntimeError::CommandChannelClosed`].
    pub async fn submit(&self, input: Input) -> Result<TurnOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Submit {
                input,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the latest published snapshot without advancing the game.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Ask the worker to stop. A worker that already stopped is left alone.
    pub(crate) async fn request_shutdown(&self) {
        let _ = self.command_tx.send(Command::Shutdown).await;
    }

    /// Subscribe to per-turn events.
    ///
    /// Receivers only see turns resolved after they subscribe.
    pub fn subscribe_events(&self) -> broadcast::Receiver<TurnEvent> {
        self.event_tx.subscribe()
    }
}
