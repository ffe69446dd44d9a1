//! Textbook quantum algorithms as small, runnable demos.
//!
//! Each driver builds a fixed-size circuit from the gate helpers and oracle
//! builders, simulates it, stores a circuit diagram and a histogram (or
//! Bloch plots) in an [`ArtifactSink`](qalgo_render::ArtifactSink) and
//! returns an [`AlgorithmOutcome`].
//!
//! | Algorithm | Qubits | Result |
//! |-----------|--------|--------|
//! | Bernstein-Vazirani | n + 1 | hidden string in one query |
//! | Grover | 2 | marked item `11` with certainty |
//! | Grover Sudoku | 9 | the two valid 2×2 grids |
//! | Teleportation | 3 | q0's state on q2 |
//! | Simon | 2n | outcomes orthogonal to the period |
//! | Shor (QFT) | n | Bloch vectors before and after |
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use qalgo_adapter_sim::Simulator;
//! use qalgo_algorithms::{Algorithm, Analysis, RunContext, RunParams};
//! use qalgo_render::MemorySink;
//!
//! let ctx = RunContext::new(Simulator::new().with_seed(7), Arc::new(MemorySink::new()));
//! let outcome = Algorithm::BernsteinVazirani
//!     .run(&ctx, RunParams::default())
//!     .unwrap();
//! assert!(matches!(outcome.analysis, Analysis::BernsteinVazirani { recovered: true, .. }));
//! ```

pub mod bits;
pub mod catalog;
pub mod classical;
pub mod drivers;
pub mod error;
pub mod gates;
pub mod oracles;

pub use bits::{BitString, MAX_BITS};
pub use catalog::{Algorithm, AlgorithmInfo, MAX_SHOTS, RunParams};
pub use classical::ClassicalSolution;
pub use drivers::teleportation::Preparation;
pub use drivers::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext, SimonEquation};
pub use error::{AlgoError, AlgoResult};
