//! Error types for the algorithm drivers.

use qalgo_adapter_sim::SimError;
use qalgo_ir::IrError;
use qalgo_render::RenderError;
use thiserror::Error;

/// Errors that can occur while building or running an algorithm.
#[derive(Debug, Error)]
pub enum AlgoError {
    /// Circuit construction failed.
    #[error("Circuit error: {0}")]
    Ir(#[from] IrError),

    /// Simulation failed.
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    /// Storing an artifact failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Driver configuration inconsistent with its circuit.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Caller-supplied parameter rejected.
    #[error("Invalid parameter: {0}")]
    InvalidParams(String),

    /// No algorithm with this slug.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
