//! qalgo Local Statevector Simulator
//!
//! Exact statevector simulation for the teaching demos, with seeded shot
//! sampling, mid-circuit measurement and Bloch-vector inspection.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation
//! - **All Standard Gates**: Every gate from `qalgo-ir`, composites expanded
//! - **Measurement Sampling**: Seeded sampling over a configurable shot count
//! - **Collapse**: Mid-circuit measurement and reset evolve per shot
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use qalgo_adapter_sim::Simulator;
//! use qalgo_ir::Circuit;
//!
//! let circuit = Circuit::bell().unwrap();
//! let result = Simulator::new().with_seed(7).run(&circuit, 1000).unwrap();
//!
//! // Only |00⟩ and |11⟩ appear.
//! assert_eq!(result.counts.get("00") + result.counts.get("11"), 1000);
//! ```

mod counts;
mod error;
mod simulator;
mod statevector;

pub use counts::{Counts, ExecutionResult};
pub use error::{SimError, SimResult};
pub use simulator::Simulator;
pub use statevector::{BasisSampler, BlochVector, Statevector};
