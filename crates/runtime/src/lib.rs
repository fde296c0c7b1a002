//! Runtime orchestration for the dungeon simulation.
//!
//! This crate moves a [`game_core::Game`] into a background worker task and
//! exposes the request/response handshake the UI drives it with. Consumers
//! embed [`Runtime`] to pull inputs from an [`InputProvider`], or talk to the
//! worker directly through a cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] defines the per-turn broadcast payload
//! - [`workers`] keeps the simulation task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{
    InputProvider, ProviderKind, Result, RuntimeError, RuntimeHandle, ScriptedInputProvider,
};
pub use events::TurnEvent;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
