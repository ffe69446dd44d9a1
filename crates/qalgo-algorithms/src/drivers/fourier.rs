//! Quantum Fourier transform of a basis state, the building block of Shor's
//! period finding. Inspection only: no measurement, no shots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qalgo_ir::{Circuit, QubitId};
use qalgo_render::ArtifactGroup;

use super::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext};
use crate::bits::BitString;
use crate::error::AlgoResult;

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourierConfig {
    /// Input basis state, e.g. `101` for |5⟩.
    pub basis_state: BitString,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            basis_state: BitString::from_value(0b101, 3),
        }
    }
}

/// Circuit preparing the basis state.
pub fn build_preparation(config: &FourierConfig) -> AlgoResult<Circuit> {
    let n = config.basis_state.len() as u32;
    let mut circuit = Circuit::with_size("fourier", n, 0);
    for i in config.basis_state.set_bits() {
        circuit.x(QubitId(i as u32))?;
    }
    Ok(circuit)
}

/// Preparation followed by the QFT as a single composite gate.
pub fn build_circuit(config: &FourierConfig) -> AlgoResult<Circuit> {
    let n = config.basis_state.len() as u32;
    let qft = Circuit::qft(n)?.to_gate("QFT")?;
    let mut circuit = build_preparation(config)?;
    circuit.barrier_all()?;
    circuit.append(&qft, (0..n).map(QubitId))?;
    Ok(circuit)
}

/// Run the driver: Bloch vectors before and after the transform.
#[instrument(skip(ctx), fields(basis_state = %config.basis_state))]
pub fn run(ctx: &RunContext, config: &FourierConfig) -> AlgoResult<AlgorithmOutcome> {
    let before_state = ctx.simulator.statevector(&build_preparation(config)?)?;
    let circuit = build_circuit(config)?;
    let after_state = ctx.simulator.statevector(&circuit)?;

    let before = before_state.bloch_vectors();
    let after = after_state.bloch_vectors();
    let probabilities: BTreeMap<String, f64> = after_state.probabilities().into_iter().collect();
    info!(qubits = before.len(), "Fourier finished");

    let input = config.basis_state.as_str();
    let artifacts = vec![
        ctx.store_circuit(ArtifactGroup::Algorithms, "fourier", &circuit)?,
        ctx.store_bloch("fourier_before", &format!("|{input}⟩ before QFT"), &before)?,
        ctx.store_bloch("fourier_after", &format!("QFT|{input}⟩"), &after)?,
    ];

    Ok(AlgorithmOutcome {
        algorithm: "shor".into(),
        circuit: CircuitSummary::from_circuit(&circuit),
        counts: None,
        probabilities,
        artifacts,
        analysis: Analysis::Fourier {
            basis_state: config.basis_state.clone(),
            before,
            after,
        },
    })
}
