//! qalgo Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures shared by the simulator,
//! the renderers and the algorithm drivers.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of validated [`Instruction`]s over qubit
//! and classical lines fixed when the circuit is built. The wire-dependency
//! view ([`CircuitDag`]) is derived on demand for depth and drawing layers.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`], grouped into
//!   [`QuantumRegister`] and [`ClassicalRegister`]
//! - **Gates**: [`StandardGate`] for built-in gates and [`CompositeGate`] for
//!   named sub-circuits such as oracles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for layering and depth
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qalgo_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! ```
//!
//! # Example: Composite Gates
//!
//! ```rust
//! use qalgo_ir::{Circuit, QubitId};
//!
//! let mut body = Circuit::with_size("flip", 2, 0);
//! body.x(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//! let flip = body.to_gate("flip").unwrap();
//!
//! let mut circuit = Circuit::with_size("outer", 3, 0);
//! circuit.append(&flip, [QubitId(1), QubitId(2)]).unwrap();
//!
//! let flat = circuit.decompose();
//! assert_eq!(flat.num_ops(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg` | 1 | S and S-dagger gates |
//! | `T`, `Tdg` | 1 | T and T-dagger gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `CY`, `CZ`, `CP` | 2 | Controlled-Y, Controlled-Z, controlled phase |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |
//! | `MCX` | n+1 | Multi-controlled X |

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{CompositeGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, ClassicalRegister, QuantumRegister, QubitId, Register};
