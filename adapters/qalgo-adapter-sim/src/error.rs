//! Error types for the simulator.

use thiserror::Error;

/// Errors that can occur while simulating a circuit.
#[derive(Debug, Error)]
pub enum SimError {
    /// Circuit exceeds the simulator's qubit limit.
    #[error("Circuit has {qubits} qubits but simulator only supports {max}")]
    CircuitTooLarge {
        /// Qubits in the circuit.
        qubits: usize,
        /// Configured limit.
        max: u32,
    },

    /// Shot count must be positive.
    #[error("Invalid shot count: {0}")]
    InvalidShots(u32),

    /// Qubit index outside the state.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit state")]
    QubitOutOfRange {
        /// Requested qubit.
        qubit: usize,
        /// Qubits in the state.
        num_qubits: usize,
    },

    /// State has no weight to sample from.
    #[error("State cannot be sampled: {0}")]
    Sampling(#[from] rand::distributions::WeightedError),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
