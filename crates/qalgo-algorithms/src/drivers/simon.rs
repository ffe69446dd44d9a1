//! Simon's algorithm: every observation is orthogonal to the hidden period.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use qalgo_ir::{Circuit, ClbitId, QubitId};
use qalgo_render::ArtifactGroup;

use super::{AlgorithmOutcome, Analysis, CircuitSummary, RunContext, SimonEquation};
use crate::bits::BitString;
use crate::error::AlgoResult;
use crate::gates::{add_hadamard, create_circuit};
use crate::oracles::simon_oracle;

/// Driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimonConfig {
    /// Hidden period `b`.
    pub secret: BitString,
}

impl Default for SimonConfig {
    fn default() -> Self {
        Self {
            secret: BitString::from_value(0b110, 3),
        }
    }
}

/// Build the circuit: `2n` qubits, `n` classical bits.
pub fn build_circuit(config: &SimonConfig) -> AlgoResult<Circuit> {
    let n = config.secret.len();
    let (mut circuit, q) = create_circuit("simon", 2 * n as u32, n as u32)?;
    let first: Vec<usize> = (0..n).collect();
    let input: Vec<QubitId> = q.select(&first)?;
    let output: Vec<QubitId> = q.select(&(n..2 * n).collect::<Vec<_>>())?;

    add_hadamard(&mut circuit, &q, &first)?;
    circuit.barrier_all()?;
    simon_oracle(&mut circuit, &input, &output, &config.secret)?;
    circuit.barrier_all()?;
    add_hadamard(&mut circuit, &q, &first)?;
    for (i, &qubit) in input.iter().enumerate() {
        circuit.measure(qubit, ClbitId(i as u32))?;
    }
    Ok(circuit)
}

/// Run the driver and check `b·z = 0 (mod 2)` for every observed `z`.
#[instrument(skip(ctx), fields(secret = %config.secret))]
pub fn run(ctx: &RunContext, config: &SimonConfig, shots: u32) -> AlgoResult<AlgorithmOutcome> {
    let circuit = build_circuit(config)?;
    let result = ctx.simulator.run(&circuit, shots)?;

    let equations: Vec<SimonEquation> = result
        .counts
        .iter()
        .map(|(z, count)| SimonEquation {
            z: z.to_string(),
            count,
            dot: config.secret.dot(z),
        })
        .collect();
    let orthogonal = equations.iter().all(|e| e.dot == 0);
    info!(observations = equations.len(), orthogonal, "Simon finished");

    let artifacts = vec![
        ctx.store_circuit(ArtifactGroup::Algorithms, "simon", &circuit)?,
        ctx.store_histogram(ArtifactGroup::Algorithms, "simon", &result.counts)?,
    ];

    Ok(AlgorithmOutcome {
        algorithm: "simon".into(),
        circuit: CircuitSummary::from_circuit(&circuit),
        probabilities: result.counts.probabilities(),
        counts: Some(result.counts),
        artifacts,
        analysis: Analysis::Simon {
            secret: config.secret.clone(),
            equations,
            orthogonal,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_shape() {
        let circuit = build_circuit(&SimonConfig::default()).unwrap();
        assert_eq!(circuit.num_qubits(), 6);
        assert_eq!(circuit.num_clbits(), 3);
        // 3 copies + 2 for the two set bits of "110".
        assert_eq!(circuit.count_ops()["cx"], 5);
    }
}
