//! Two-qubit Grover search for the marked item `11`.

use std::collections::BTreeMap;

use tracing::{info, instrument};

use qalgo_ir::Circuit;
use qalgo_render::ArtifactGroup;

use super::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext};
use crate::error::AlgoResult;
use crate::gates::{add_hadamard, add_z, create_circuit};

/// The item the CZ oracle marks.
pub const MARKED: &str = "11";

/// Build the search circuit without measurement.
///
/// One iteration is exact for a single marked item among four.
pub fn build_unmeasured() -> AlgoResult<Circuit> {
    let (mut circuit, q) = create_circuit("grover", 2, 2)?;
    add_hadamard(&mut circuit, &q, &[0, 1])?;
    // Oracle: phase flip on |11⟩.
    add_z(&mut circuit, &q, [0, 1])?;
    // Diffusion.
    add_hadamard(&mut circuit, &q, &[0, 1])?;
    circuit.z(q.qubit(0)?)?;
    circuit.z(q.qubit(1)?)?;
    add_z(&mut circuit, &q, [0, 1])?;
    add_hadamard(&mut circuit, &q, &[0, 1])?;
    Ok(circuit)
}

/// Build the search circuit with measurement of both qubits.
pub fn build_circuit() -> AlgoResult<Circuit> {
    let mut circuit = build_unmeasured()?;
    circuit.measure_all()?;
    Ok(circuit)
}

/// Run the driver: exact probabilities from the state, then sampling.
#[instrument(skip(ctx))]
pub fn run(ctx: &RunContext, shots: u32) -> AlgoResult<AlgorithmOutcome> {
    let state = ctx.simulator.statevector(&build_unmeasured()?)?;
    let probabilities: BTreeMap<String, f64> = state.probabilities().into_iter().collect();
    let probability = probabilities.get(MARKED).copied().unwrap_or(0.0);

    let circuit = build_circuit()?;
    let result = ctx.simulator.run(&circuit, shots)?;
    let frequency = result.counts.probabilities().get(MARKED).copied().unwrap_or(0.0);
    info!(probability, frequency, "Grover finished");

    let artifacts = vec![
        ctx.store_circuit(ArtifactGroup::Algorithms, "grover", &circuit)?,
        ctx.store_histogram(ArtifactGroup::Algorithms, "grover", &result.counts)?,
    ];

    Ok(AlgorithmOutcome {
        algorithm: "grover".into(),
        circuit: CircuitSummary::from_circuit(&circuit),
        counts: Some(result.counts),
        probabilities,
        artifacts,
        analysis: Analysis::Grover {
            marked: MARKED.into(),
            frequency,
            probability,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalgo_adapter_sim::Simulator;

    #[test]
    fn test_marked_item_is_certain() {
        let state = Simulator::new()
            .statevector(&build_unmeasured().unwrap())
            .unwrap();
        let probs = state.probabilities();
        assert_eq!(probs.len(), 1);
        assert_eq!(probs[0].0, MARKED);
        assert!((probs[0].1 - 1.0).abs() < 1e-9);
    }
}
