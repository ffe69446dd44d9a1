//! Application state for the web service.

use std::sync::Arc;

use qalgo_adapter_sim::Simulator;
use qalgo_algorithms::RunContext;
use qalgo_opinions::{MemoryOpinionStore, OpinionStore, SqliteOpinionStore, StoreError};
use qalgo_render::{ArtifactSink, FsSink, MemorySink};

use crate::config::{AppConfig, OutputMode, StorageBackend};

/// Shared application state.
pub struct AppState {
    /// Effective configuration.
    pub config: AppConfig,
    /// Simulator, artifact sink and default shots for driver runs.
    pub run: RunContext,
    /// Opinion persistence.
    pub opinions: Arc<dyn OpinionStore>,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(
        config: AppConfig,
        opinions: Arc<dyn OpinionStore>,
        sink: Arc<dyn ArtifactSink>,
    ) -> Self {
        let mut simulator = Simulator::with_max_qubits(config.simulation.max_qubits);
        if let Some(seed) = config.simulation.seed {
            simulator = simulator.with_seed(seed);
        }
        let run = RunContext::new(simulator, sink)
            .with_default_shots(config.simulation.default_shots);
        Self {
            config,
            run,
            opinions,
        }
    }

    /// Build the stores the configuration names.
    ///
    /// Opens the SQLite file synchronously; call it before serving.
    pub fn from_config(config: AppConfig) -> Result<Self, StoreError> {
        let opinions: Arc<dyn OpinionStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryOpinionStore::new()),
            StorageBackend::Sqlite => {
                let path = config.storage.path.clone().ok_or_else(|| {
                    StoreError::Internal("sqlite storage configured without a path".into())
                })?;
                Arc::new(SqliteOpinionStore::new(path)?)
            }
        };
        let sink: Arc<dyn ArtifactSink> = match config.output.mode {
            OutputMode::Memory => Arc::new(MemorySink::new()),
            OutputMode::Filesystem => Arc::new(FsSink::new(config.output.results_dir.clone())),
        };
        Ok(Self::new(config, opinions, sink))
    }

    /// Fully in-memory state, for tests.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(
            config,
            Arc::new(MemoryOpinionStore::new()),
            Arc::new(MemorySink::new()),
        )
    }

    /// Artifact sink shared with the drivers.
    pub fn sink(&self) -> &Arc<dyn ArtifactSink> {
        &self.run.sink
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory(AppConfig::default())
    }
}
