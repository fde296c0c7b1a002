//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use game_core::{Catalog, Game, GameConfig, TurnOutcome, WorldBlueprint};

use crate::api::{InputProvider, ProviderKind, Result, RuntimeError, RuntimeHandle};
use crate::events::TurnEvent;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
///
/// Buffer sizes below one are raised to one when the runtime is built.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the game simulation
///
/// Runtime owns the worker and coordinates input; [`RuntimeHandle`]
/// provides a cloneable façade for other clients.
pub struct Runtime {
    handle: RuntimeHandle,
    input_provider: Option<Box<dyn InputProvider>>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to per-turn events
    pub fn subscribe_events(&self) -> broadcast::Receiver<TurnEvent> {
        self.handle.subscribe_events()
    }

    /// Execute a single request/response round.
    ///
    /// Hands the latest snapshot to the input provider and submits the input
    /// it returns.
    pub async fn step(&mut self) -> Result<TurnOutcome> {
        let provider = self
            .input_provider
            .as_ref()
            .ok_or(RuntimeError::ProviderNotSet {
                kind: ProviderKind::Input,
            })?;

        let snapshot = self.handle.snapshot().await?;
        let input = provider.next_input(&snapshot).await?;
        self.handle.submit(input).await
    }

    /// Run the game loop until the provider asks to quit.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            if let TurnOutcome::Quit = self.step().await? {
                return Ok(());
            }
        }
    }

    /// Set the input provider
    pub fn set_input_provider(&mut self, provider: impl InputProvider + 'static) {
        self.input_provider = Some(Box::new(provider));
    }

    /// Shutdown the runtime gracefully
    ///
    /// Stops the worker even while cloned handles are still alive; their
    /// later calls fail with [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        self.handle.request_shutdown().await;
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        info!(target: "runtime", "runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    game: Option<Game>,
    world: Option<WorldBlueprint>,
    catalog: Option<Catalog>,
    input_provider: Option<Box<dyn InputProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            game: None,
            world: None,
            catalog: None,
            input_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide an already generated game. Takes precedence over [`world`](Self::world).
    pub fn initial_game(mut self, game: Game) -> Self {
        self.game = Some(game);
        self
    }

    /// Provide a world blueprint to generate at build time.
    pub fn world(mut self, world: WorldBlueprint) -> Self {
        self.world = Some(world);
        self
    }

    /// Template catalog used with [`world`](Self::world). Defaults to the builtin catalog.
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the input provider (optional; required for [`Runtime::step`])
    pub fn input_provider(mut self, provider: impl InputProvider + 'static) -> Self {
        self.input_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let game = match (self.game, self.world) {
            (Some(game), _) => game,
            (None, Some(world)) => {
                let catalog = self.catalog.unwrap_or_default();
                Game::from_blueprint(&world, &catalog, self.config.game_config.clone())
                    .map_err(RuntimeError::Generation)?
            }
            (None, None) => return Err(RuntimeError::MissingWorld),
        };

        // Both channel constructors panic on a zero capacity.
        let command_buffer_size = self.config.command_buffer_size.max(1);
        let event_buffer_size = self.config.event_buffer_size.max(1);
        let (command_tx, command_rx) = mpsc::channel::<Command>(command_buffer_size);
        let (event_tx, _event_rx) = broadcast::channel::<TurnEvent>(event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let sim_worker = SimulationWorker::new(game, command_rx, event_tx);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            input_provider: self.input_provider,
            sim_worker_handle,
        })
    }
}
