//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, world generation and input
//! providers so clients can bubble them up with consistent context.
use std::fmt;

use thiserror::Error;
use tokio::sync::oneshot;

use game_core::GenerationError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{kind} provider not set")]
    ProviderNotSet { kind: ProviderKind },

    #[error("input provider closed")]
    InputProviderClosed,

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a game or a world blueprint before building")]
    MissingWorld,

    #[error("failed to generate the world")]
    Generation(#[source] GenerationError),
}

#[derive(Debug, Copy, Clone)]
pub enum ProviderKind {
    Input,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Input => "input",
        };
        write!(f, "{}", label)
    }
}
